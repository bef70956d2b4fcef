//! The settings window's state and the operations the UI and host drive.

use crate::bookmarks::BookmarkEditor;
use crate::bridge::{CredentialsSaved, HostBridge, HostCommand, HostEvent, Notification};
use crate::config::ConfigStore;
use crate::guard::{ChangeGuard, CloseVerdict, DecisionOutcome};
use crate::launch::LaunchContext;
use crate::login::{LoginForm, LoginOutcome};
use crate::options;
use crate::secrets::CredentialVault;
use jira_prefs::{
    Bookmark, OptionKey, PreferenceRecord, PrefsError, Result, SortField, SortFieldName,
};
use log::{debug, info, warn};
use std::collections::BTreeSet;

/// Whether the window keeps running after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFlow {
    Continue,
    /// A `close` command was sent; no further input is expected.
    Closing,
}

/// One open settings window. Every mutation happens through a method call
/// on this type, one at a time, in the order inputs arrive.
pub struct SettingsSession<B: HostBridge, V: CredentialVault> {
    launch: LaunchContext,
    store: ConfigStore,
    bridge: B,
    vault: V,
    record: PreferenceRecord,
    login: LoginForm,
    show_login: bool,
    bookmarks: BookmarkEditor,
    guard: ChangeGuard,
    downloads: BTreeSet<String>,
}

impl<B: HostBridge, V: CredentialVault> SettingsSession<B, V> {
    /// Loads the record and asks the host for any option slot that is not
    /// resolved yet.
    pub fn open(launch: LaunchContext, store: ConfigStore, bridge: B, vault: V) -> Result<Self> {
        let record = store.load()?;
        let requested = options::validate(&record.options, &bridge)?;
        if !requested.is_empty() {
            debug!("Requested {} option slot(s) from host", requested.len());
        }

        info!(
            "Opened {} {} settings (login only: {})",
            launch.app_name, launch.version, launch.login_only
        );

        Ok(Self {
            login: LoginForm::from_record(&record),
            show_login: launch.login_only,
            guard: ChangeGuard::new(launch.login_only),
            bookmarks: BookmarkEditor::default(),
            downloads: BTreeSet::new(),
            launch,
            store,
            bridge,
            vault,
            record,
        })
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn launch(&self) -> &LaunchContext {
        &self.launch
    }

    pub fn record(&self) -> &PreferenceRecord {
        &self.record
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    pub fn show_login(&self) -> bool {
        self.show_login
    }

    pub fn bookmark_editor(&self) -> &BookmarkEditor {
        &self.bookmarks
    }

    pub fn downloads_in_progress(&self) -> &BTreeSet<String> {
        &self.downloads
    }

    pub fn is_dirty(&self) -> Result<bool> {
        ChangeGuard::is_dirty(&self.record, &self.store)
    }

    fn send(&self, command: HostCommand) -> Result<()> {
        self.bridge.send(command).map_err(PrefsError::Bridge)
    }

    fn close(&self) -> Result<SessionFlow> {
        info!("Closing settings window");
        self.send(HostCommand::Close)?;
        Ok(SessionFlow::Closing)
    }

    // Login

    pub fn open_login(&mut self) {
        self.show_login = true;
    }

    pub fn set_login_user(&mut self, user: &str) {
        self.login.set_user(user);
    }

    pub fn set_login_url(&mut self, url: &str) {
        self.login.set_url(url);
    }

    pub fn set_login_password(&mut self, password: &str) {
        self.login.set_password(password);
    }

    /// Effective SSL toggle shown next to the URL field.
    pub fn ssl(&self) -> bool {
        self.record.uses_ssl()
    }

    pub fn set_ssl(&mut self, ssl: bool) {
        self.record.ssl = Some(ssl);
    }

    /// Stores the credential and, in login-only mode, tells the host it can
    /// proceed. Incomplete input changes nothing.
    pub fn login(&mut self) -> Result<LoginOutcome> {
        let outcome = self.login.submit(&mut self.record, &self.vault)?;
        match &outcome {
            LoginOutcome::Saved { url, user } => {
                info!("Credentials saved for {}", user);
                if self.launch.login_only {
                    self.send(HostCommand::CredentialsSaved(CredentialsSaved {
                        url: url.clone(),
                        user: user.clone(),
                    }))?;
                }
                self.show_login = false;
            }
            LoginOutcome::Incomplete { missing } => {
                debug!("Login ignored, missing {:?}", missing);
            }
        }
        Ok(outcome)
    }

    /// Escape on the login form. Login-only windows close; otherwise the form
    /// is reseeded from the durable file.
    pub fn cancel_login(&mut self) -> Result<SessionFlow> {
        if self.launch.login_only {
            return self.close();
        }
        let durable = self.store.load()?;
        self.login.reset_from(&durable);
        self.show_login = false;
        Ok(SessionFlow::Continue)
    }

    // Preferences

    /// Normalizes the URL, writes the record and closes the window. On a
    /// write error nothing is sent and the in-memory record is kept.
    pub fn save(&mut self) -> Result<SessionFlow> {
        self.record.normalize_url();
        self.store.persist(&self.record)?;
        info!("Preferences saved to {}", self.store.path().display());
        self.close()
    }

    pub fn clear_cache(&self) -> Result<()> {
        self.send(HostCommand::ClearCache)
    }

    /// Asks the host to log out. The unsaved-changes prompt is off afterwards.
    pub fn logout(&mut self) -> Result<()> {
        self.send(HostCommand::Logout)?;
        self.guard.disarm();
        Ok(())
    }

    pub fn download(&mut self, kind: &str) -> Result<()> {
        self.send(HostCommand::DownloadImages(kind.to_string()))?;
        self.downloads.insert(kind.to_string());
        Ok(())
    }

    /// A close attempt from the window. Dirty state asks the host for a
    /// decision, which comes back as a `close-client` event.
    pub fn request_close(&mut self) -> Result<SessionFlow> {
        match self.guard.on_close_attempt(&self.record, &self.store)? {
            CloseVerdict::Close => self.close(),
            CloseVerdict::Prompt => {
                debug!("Unsaved changes, asking host");
                self.send(HostCommand::SaveChanges)?;
                Ok(SessionFlow::Continue)
            }
        }
    }

    // Sort order

    pub fn sort_choices(&self, position: usize) -> Result<Vec<SortFieldName>> {
        self.record.sort_choices(position)
    }

    pub fn set_sort_field(&mut self, position: usize, name: SortFieldName) -> Result<()> {
        self.record.set_sort_field(position, name)
    }

    pub fn add_sort_field(&mut self) -> Option<SortFieldName> {
        self.record.add_sort_field()
    }

    pub fn remove_sort_field(&mut self, position: usize) -> Result<SortField> {
        self.record.remove_sort_field(position)
    }

    // Options

    pub fn set_option_enabled(&mut self, key: OptionKey, name: &str, enabled: bool) -> bool {
        self.record.options.set_enabled(key, name, enabled)
    }

    // Bookmarks

    pub fn edit_bookmark(&mut self, index: usize) -> Result<()> {
        self.bookmarks.start_edit(&self.record, index)
    }

    pub fn new_bookmark(&mut self) {
        self.bookmarks.start_new();
    }

    pub fn set_bookmark_name(&mut self, name: &str) -> Result<()> {
        self.bookmarks.set_name(&mut self.record, name)
    }

    pub fn set_bookmark_query(&mut self, query: &str) -> Result<()> {
        self.bookmarks.set_query(&mut self.record, query)
    }

    pub fn set_bookmark_cache(&mut self, milliseconds: u64) -> Result<()> {
        self.bookmarks.set_cache(&mut self.record, milliseconds)
    }

    pub fn save_bookmark(&mut self) {
        self.bookmarks.save(&mut self.record);
    }

    pub fn commit_bookmark(&mut self, bookmark: Option<Bookmark>) {
        self.bookmarks.commit(&mut self.record, bookmark);
    }

    pub fn delete_bookmark(&mut self, index: usize) -> Result<Bookmark> {
        self.bookmarks.remove(&mut self.record, index)
    }

    // Host events

    pub fn handle_event(&mut self, event: HostEvent) -> Result<SessionFlow> {
        match event {
            HostEvent::SetOption { key, options: fetched } => {
                options::apply_fetch_result(&mut self.record.options, key, fetched);
                Ok(SessionFlow::Continue)
            }
            HostEvent::CloseClient(decision) => match self.guard.on_decision(decision) {
                DecisionOutcome::Stay => Ok(SessionFlow::Continue),
                DecisionOutcome::SaveAndClose => self.save(),
                DecisionOutcome::DiscardAndClose => self.close(),
            },
            HostEvent::DownloadComplete(kind) => {
                self.downloads.remove(&kind);
                let notification = Notification {
                    title: self.launch.app_name.clone(),
                    body: format!("Finished downloading icons: {kind}"),
                    icon: self.launch.icon.clone(),
                };
                if let Err(err) = self.bridge.notify(notification) {
                    warn!("Failed to show notification: {}", err);
                }
                Ok(SessionFlow::Continue)
            }
        }
    }
}
