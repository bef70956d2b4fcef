//! Read-only values the host injects at startup.

use std::env;

const LOGIN_ONLY_ENV: &str = "JIRA_LOGIN_ONLY";
const APP_NAME_ENV: &str = "JIRA_APP_NAME";
const VERSION_ENV: &str = "JIRA_APP_VERSION";
const ICON_ENV: &str = "JIRA_APP_ICON";
const DEFAULT_APP_NAME: &str = "Jira";

/// Launch-time context. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchContext {
    /// The window was opened only to collect credentials.
    pub login_only: bool,
    pub app_name: String,
    pub version: String,
    pub icon: Option<String>,
}

impl Default for LaunchContext {
    fn default() -> Self {
        Self {
            login_only: false,
            app_name: DEFAULT_APP_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            icon: None,
        }
    }
}

impl LaunchContext {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            login_only: non_empty(LOGIN_ONLY_ENV)
                .map(|value| parse_flag(&value))
                .unwrap_or(false),
            app_name: non_empty(APP_NAME_ENV).unwrap_or(defaults.app_name),
            version: non_empty(VERSION_ENV).unwrap_or(defaults.version),
            icon: non_empty(ICON_ENV),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
