//! Message shapes exchanged with the host process and the bridge seam.
//!
//! The host owns the window and performs privileged work; this side only
//! sends commands and reacts to events. Channel names match the host's.

use jira_prefs::{OptionEntry, OptionKey};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

/// Outbound request to the host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "channel", content = "payload")]
pub enum HostCommand {
    #[serde(rename = "get-option")]
    GetOption(OptionKey),
    #[serde(rename = "credentials-saved")]
    CredentialsSaved(CredentialsSaved),
    #[serde(rename = "close")]
    Close,
    #[serde(rename = "logout")]
    Logout,
    #[serde(rename = "clearCache")]
    ClearCache,
    #[serde(rename = "download-imgs")]
    DownloadImages(String),
    #[serde(rename = "save-changes")]
    SaveChanges,
}

/// Sent in login-only mode once the credential is stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CredentialsSaved {
    pub url: String,
    pub user: String,
}

/// Inbound event from the host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "channel", content = "payload")]
pub enum HostEvent {
    #[serde(rename = "set-option")]
    SetOption {
        key: OptionKey,
        options: Vec<OptionEntry>,
    },
    #[serde(rename = "close-client")]
    CloseClient(CloseDecision),
    #[serde(rename = "download-complete")]
    DownloadComplete(String),
}

/// Answer to the unsaved-changes prompt, encoded on the wire as 0, 1 or 2.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub enum CloseDecision {
    SaveAndClose,
    DiscardAndClose,
    Cancel,
}

impl TryFrom<u8> for CloseDecision {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CloseDecision::SaveAndClose),
            1 => Ok(CloseDecision::DiscardAndClose),
            2 => Ok(CloseDecision::Cancel),
            other => Err(format!("unknown close decision {other}")),
        }
    }
}

impl From<CloseDecision> for u8 {
    fn from(decision: CloseDecision) -> Self {
        match decision {
            CloseDecision::SaveAndClose => 0,
            CloseDecision::DiscardAndClose => 1,
            CloseDecision::Cancel => 2,
        }
    }
}

/// System notification shown on the user's desktop.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: Option<String>,
}

/// Command-sending capability handed to the settings session.
pub trait HostBridge {
    fn send(&self, command: HostCommand) -> Result<(), String>;
    fn notify(&self, notification: Notification) -> Result<(), String>;
}

/// Everything the session emits, as framed for the transport.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Outbound {
    Command(HostCommand),
    Notify(Notification),
}

/// Bridge that forwards outbound messages to a writer task.
#[derive(Clone)]
pub struct ChannelBridge {
    tx: UnboundedSender<Outbound>,
}

impl ChannelBridge {
    pub fn new(tx: UnboundedSender<Outbound>) -> Self {
        Self { tx }
    }

    fn forward(&self, message: Outbound) -> Result<(), String> {
        self.tx
            .send(message)
            .map_err(|_| "Host channel is closed".to_string())
    }
}

impl HostBridge for ChannelBridge {
    fn send(&self, command: HostCommand) -> Result<(), String> {
        log::debug!("-> host: {:?}", command);
        self.forward(Outbound::Command(command))
    }

    fn notify(&self, notification: Notification) -> Result<(), String> {
        self.forward(Outbound::Notify(notification))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{HostBridge, HostCommand, Notification};
    use std::cell::RefCell;

    /// Captures everything sent to the host.
    #[derive(Default)]
    pub struct RecordingBridge {
        pub commands: RefCell<Vec<HostCommand>>,
        pub notifications: RefCell<Vec<Notification>>,
    }

    impl RecordingBridge {
        pub fn take(&self) -> Vec<HostCommand> {
            self.commands.borrow_mut().drain(..).collect()
        }
    }

    impl HostBridge for RecordingBridge {
        fn send(&self, command: HostCommand) -> Result<(), String> {
            self.commands.borrow_mut().push(command);
            Ok(())
        }

        fn notify(&self, notification: Notification) -> Result<(), String> {
            self.notifications.borrow_mut().push(notification);
            Ok(())
        }
    }
}
