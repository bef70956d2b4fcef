//! Option slot validation and fetch-response handling.

use crate::bridge::{HostBridge, HostCommand};
use jira_prefs::{OptionEntry, OptionKey, OptionSet, PrefsError, Result};
use log::debug;

/// Requests a fetch for every unresolved slot. Slots are left untouched;
/// the answers arrive later through [`apply_fetch_result`]. Returns the keys
/// that were requested.
pub fn validate(options: &OptionSet, bridge: &dyn HostBridge) -> Result<Vec<OptionKey>> {
    let missing = options.unresolved_keys();
    for key in &missing {
        debug!("Option slot {} unresolved, requesting from host", key);
        bridge
            .send(HostCommand::GetOption(*key))
            .map_err(PrefsError::Bridge)?;
    }
    Ok(missing)
}

/// Replaces `key` with the fetched list, carrying over which names were
/// selected before the refresh.
pub fn apply_fetch_result(options: &mut OptionSet, key: OptionKey, fetched: Vec<OptionEntry>) {
    options.merge_fetched(key, fetched);
}
