//! Backend of the Jira workflow's settings and login window.
//!
//! The window's state lives in [`session::SettingsSession`]. [`run`] drives one
//! session over newline-delimited JSON on stdio: host events and user actions
//! come in on stdin, host commands and notifications go out on stdout.

use jira_prefs::{PrefsError, Result};
use log::{debug, error, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};

pub mod actions;
pub mod bookmarks;
pub mod bridge;
pub mod config;
pub mod guard;
pub mod launch;
pub mod login;
pub mod options;
pub mod secrets;
pub mod session;

use actions::Inbound;
use bridge::{ChannelBridge, Outbound};
use config::ConfigStore;
use launch::LaunchContext;
use secrets::KeyringVault;
use session::{SessionFlow, SettingsSession};

/// Writes each outbound message to stdout as one JSON line.
async fn write_outbound(mut rx: UnboundedReceiver<Outbound>) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    while let Some(message) = rx.recv().await {
        let mut line = serde_json::to_vec(&message)?;
        line.push(b'\n');
        stdout.write_all(&line).await?;
        stdout.flush().await?;
    }
    Ok(())
}

/// Settles the result of one dispatched input. Fatal errors end the session;
/// the rest are logged so in-memory edits survive and the user can retry.
fn settle(result: Result<SessionFlow>) -> Result<SessionFlow> {
    match result {
        Err(err) if err.is_fatal() => Err(err),
        Err(err) => {
            error!("{}", err);
            Ok(SessionFlow::Continue)
        }
        flow => flow,
    }
}

async fn serve_stdio() -> Result<()> {
    let launch = LaunchContext::from_env();
    let store = ConfigStore::new()?;
    store.ensure_parent_dir()?;
    debug!("Using config file {}", store.path().display());

    let vault = KeyringVault::new(None);
    match vault.has_token() {
        Ok(has_token) => debug!("Stored credential present: {}", has_token),
        Err(err) => warn!("Keyring unavailable: {}", err),
    }

    let (tx, rx) = mpsc::unbounded_channel();
    let writer = tokio::spawn(write_outbound(rx));

    let mut session = SettingsSession::open(launch, store, ChannelBridge::new(tx), vault)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut outcome: Result<()> = Ok(());
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let inbound: Inbound = match serde_json::from_str(trimmed) {
            Ok(inbound) => inbound,
            Err(err) => {
                warn!("Skipping malformed message: {}", err);
                continue;
            }
        };
        match settle(session.dispatch(inbound)) {
            Ok(SessionFlow::Continue) => {}
            Ok(SessionFlow::Closing) => break,
            Err(err) => {
                outcome = Err(err);
                break;
            }
        }
    }

    // Dropping the session closes the channel so the writer drains and exits.
    drop(session);
    match writer.await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => warn!("Failed to write to host: {}", err),
        Err(err) => warn!("Host writer task failed: {}", err),
    }
    outcome
}

pub fn run() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .try_init();

    info!("Starting Jira settings backend");

    let runtime = match tokio::runtime::Builder::new_current_thread().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("Failed to start runtime: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = runtime.block_on(serve_stdio()) {
        error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn parse_errors_end_the_session() {
        let result = settle(Err(PrefsError::Parse {
            path: PathBuf::from("config.json"),
            message: "key must be a string".into(),
        }));
        assert!(matches!(result, Err(PrefsError::Parse { .. })));
    }

    #[test]
    fn recoverable_errors_keep_the_session_running() {
        let recoverable = vec![
            PrefsError::write("config.json", io::Error::from(io::ErrorKind::NotFound)),
            PrefsError::Bridge("Host channel is closed".into()),
            PrefsError::Credentials("vault unavailable".into()),
            PrefsError::BookmarkIndexOutOfRange { index: 9, len: 3 },
            PrefsError::SortPositionOutOfRange { position: 4, len: 2 },
        ];
        for err in recoverable {
            assert_eq!(settle(Err(err)).expect("recoverable"), SessionFlow::Continue);
        }
    }

    #[test]
    fn flows_pass_through() {
        assert_eq!(settle(Ok(SessionFlow::Closing)).expect("flow"), SessionFlow::Closing);
        assert_eq!(settle(Ok(SessionFlow::Continue)).expect("flow"), SessionFlow::Continue);
    }
}
