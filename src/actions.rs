//! User-originated inputs from the presentation layer.

use crate::bridge::{HostBridge, HostEvent};
use crate::login::LoginOutcome;
use crate::secrets::CredentialVault;
use crate::session::{SessionFlow, SettingsSession};
use jira_prefs::{OptionKey, Result, SortFieldName};
use log::debug;
use serde::{Deserialize, Deserializer};
use std::fmt;
use zeroize::Zeroizing;

/// Password as typed, wiped on drop and never printed.
pub struct Secret(Zeroizing<String>);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Secret(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Secret::new)
    }
}

/// One edit or button press from the settings form.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserAction {
    OpenLogin,
    SetLoginUser { user: String },
    SetLoginUrl { url: String },
    SetLoginPassword { password: Secret },
    SetSsl { ssl: bool },
    Login,
    CancelLogin,
    /// Escape key anywhere in the window.
    Escape,
    Save,
    ClearCache,
    Logout,
    Download { kind: String },
    Close,
    SetSortField { position: usize, name: SortFieldName },
    AddSortField,
    RemoveSortField { position: usize },
    SetOptionEnabled { key: OptionKey, name: String, enabled: bool },
    NewBookmark,
    EditBookmark { index: usize },
    SetBookmarkName { name: String },
    SetBookmarkQuery { query: String },
    SetBookmarkCache { cache: u64 },
    SaveBookmark,
    DeleteBookmark { index: usize },
}

/// One line of input: either a host event or a user action.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inbound {
    Event(HostEvent),
    Action(UserAction),
}

impl<B: HostBridge, V: CredentialVault> SettingsSession<B, V> {
    pub fn dispatch(&mut self, inbound: Inbound) -> Result<SessionFlow> {
        match inbound {
            Inbound::Event(event) => self.handle_event(event),
            Inbound::Action(action) => self.apply(action),
        }
    }

    pub fn apply(&mut self, action: UserAction) -> Result<SessionFlow> {
        match action {
            UserAction::OpenLogin => self.open_login(),
            UserAction::SetLoginUser { user } => self.set_login_user(&user),
            UserAction::SetLoginUrl { url } => self.set_login_url(&url),
            UserAction::SetLoginPassword { password } => self.set_login_password(password.expose()),
            UserAction::SetSsl { ssl } => self.set_ssl(ssl),
            UserAction::Login => {
                if let LoginOutcome::Incomplete { missing } = self.login()? {
                    debug!("Login form incomplete: {:?}", missing);
                }
            }
            UserAction::CancelLogin | UserAction::Escape => return self.cancel_login(),
            UserAction::Save => return self.save(),
            UserAction::ClearCache => self.clear_cache()?,
            UserAction::Logout => self.logout()?,
            UserAction::Download { kind } => self.download(&kind)?,
            UserAction::Close => return self.request_close(),
            UserAction::SetSortField { position, name } => self.set_sort_field(position, name)?,
            UserAction::AddSortField => {
                if self.add_sort_field().is_none() {
                    debug!("Every sort field is already in use");
                }
            }
            UserAction::RemoveSortField { position } => {
                self.remove_sort_field(position)?;
            }
            UserAction::SetOptionEnabled { key, name, enabled } => {
                if !self.set_option_enabled(key, &name, enabled) {
                    debug!("No option {} in {}", name, key);
                }
            }
            UserAction::NewBookmark => self.new_bookmark(),
            UserAction::EditBookmark { index } => self.edit_bookmark(index)?,
            UserAction::SetBookmarkName { name } => self.set_bookmark_name(&name)?,
            UserAction::SetBookmarkQuery { query } => self.set_bookmark_query(&query)?,
            UserAction::SetBookmarkCache { cache } => self.set_bookmark_cache(cache)?,
            UserAction::SaveBookmark => self.save_bookmark(),
            UserAction::DeleteBookmark { index } => {
                self.delete_bookmark(index)?;
            }
        }
        Ok(SessionFlow::Continue)
    }
}
