//! Login form buffer, kept apart from the persisted record until submit.

use crate::secrets::{encode_credentials, CredentialVault};
use jira_prefs::url::{strip_protocol, with_protocol};
use jira_prefs::{PreferenceRecord, PrefsError, Result};
use std::fmt;
use zeroize::Zeroizing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    User,
    Password,
    Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credential stored; the record now holds the full URL and user.
    Saved { url: String, user: String },
    /// Nothing was changed because these fields are empty.
    Incomplete { missing: Vec<LoginField> },
}

/// Transient `{user, url, password}` buffer. The URL is always held without
/// a scheme; the scheme comes from the record's SSL toggle on submit.
#[derive(Default)]
pub struct LoginForm {
    user: String,
    url: String,
    password: Zeroizing<String>,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("user", &self.user)
            .field("url", &self.url)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl LoginForm {
    pub fn from_record(record: &PreferenceRecord) -> Self {
        let mut form = Self::default();
        form.reset_from(record);
        form
    }

    /// Reseeds user and URL from `record` and clears the password.
    pub fn reset_from(&mut self, record: &PreferenceRecord) {
        self.user = record.user.clone();
        self.set_url(&record.url);
        self.clear_password();
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }

    pub fn set_user(&mut self, user: &str) {
        self.user = user.to_string();
    }

    /// Stores the URL with schemes and whitespace stripped.
    pub fn set_url(&mut self, url: &str) {
        self.url = strip_protocol(url);
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = Zeroizing::new(password.to_string());
    }

    fn clear_password(&mut self) {
        self.password = Zeroizing::new(String::new());
    }

    pub fn missing_fields(&self) -> Vec<LoginField> {
        let mut missing = Vec::new();
        if self.user.is_empty() {
            missing.push(LoginField::User);
        }
        if self.password.is_empty() {
            missing.push(LoginField::Password);
        }
        if self.url.is_empty() {
            missing.push(LoginField::Url);
        }
        missing
    }

    /// Stores the encoded credential and writes URL and user into `record`.
    /// Incomplete input leaves everything untouched.
    pub fn submit(
        &mut self,
        record: &mut PreferenceRecord,
        vault: &dyn CredentialVault,
    ) -> Result<LoginOutcome> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Ok(LoginOutcome::Incomplete { missing });
        }

        let url = with_protocol(&self.url, record.uses_ssl());
        let token = encode_credentials(&self.user, &self.password);
        vault.save_token(&token).map_err(PrefsError::Credentials)?;

        record.url = url.clone();
        record.user = self.user.clone();
        self.clear_password();

        Ok(LoginOutcome::Saved {
            url,
            user: self.user.clone(),
        })
    }
}
