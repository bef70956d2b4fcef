//! Tracker base URL helpers.
//!
//! The login form edits the host part without a scheme; the scheme is chosen
//! by the SSL toggle and only re-attached when credentials are saved.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{HTTPS_PREFIX, HTTP_PREFIX};

static PROTOCOL_OR_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+|https?://").expect("invalid protocol regex"));

/// Removes every `http://`/`https://` occurrence and all whitespace.
pub fn strip_protocol(url: &str) -> String {
    PROTOCOL_OR_WHITESPACE.replace_all(url, "").into_owned()
}

/// Collapses any trailing slashes into exactly one. Empty input stays empty.
pub fn normalize_trailing_slash(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    format!("{}/", url.trim_end_matches('/'))
}

/// Prefixes the scheme selected by `ssl` and normalizes the trailing slash.
pub fn with_protocol(display_url: &str, ssl: bool) -> String {
    let prefix = if ssl { HTTPS_PREFIX } else { HTTP_PREFIX };
    normalize_trailing_slash(&format!("{prefix}{display_url}"))
}

/// Default SSL toggle for a stored URL: on unless it literally uses `http://`.
pub fn detect_ssl(url: &str) -> bool {
    !url.contains(HTTP_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_protocol_removes_scheme_and_whitespace() {
        assert_eq!(strip_protocol("https://jira.example.com/"), "jira.example.com/");
        assert_eq!(strip_protocol(" HTTP://jira .example.com"), "jira.example.com");
        assert_eq!(strip_protocol("jira.example.com"), "jira.example.com");
    }

    #[test]
    fn strip_protocol_is_idempotent() {
        let once = strip_protocol("http://https://example.com/ foo");
        assert_eq!(strip_protocol(&once), once);
    }

    #[test]
    fn with_protocol_appends_exactly_one_slash() {
        assert_eq!(with_protocol("example.com", false), "http://example.com/");
        assert_eq!(with_protocol("example.com/foo", false), "http://example.com/foo/");
        assert_eq!(with_protocol("example.com/foo///", true), "https://example.com/foo/");
    }

    #[test]
    fn normalize_trailing_slash_keeps_empty_input_empty() {
        assert_eq!(normalize_trailing_slash(""), "");
        assert_eq!(normalize_trailing_slash("https://a//"), "https://a/");
    }

    #[test]
    fn detect_ssl_defaults_to_https() {
        assert!(detect_ssl(""));
        assert!(detect_ssl("jira.example.com/"));
        assert!(detect_ssl("https://jira.example.com/"));
        assert!(!detect_ssl("http://jira.example.com/"));
    }
}
