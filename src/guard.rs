//! Unsaved-changes guard consulted on every close attempt.

use crate::bridge::CloseDecision;
use crate::config::ConfigStore;
use jira_prefs::{PreferenceRecord, Result};

/// What to do with a close attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseVerdict {
    /// Nothing to lose; close right away.
    Close,
    /// Ask the host for a save/discard/cancel decision first.
    Prompt,
}

/// How to proceed once the host answered the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    Stay,
    SaveAndClose,
    DiscardAndClose,
}

/// Tracks the prompt latch. In ask-once mode (login-only launches) a dirty
/// close prompts once per session and later attempts close unconditionally;
/// otherwise every dirty close prompts. A cancel re-arms the prompt in both
/// modes.
#[derive(Debug, Clone)]
pub struct ChangeGuard {
    ask_once: bool,
    prompted: bool,
    armed: bool,
}

impl ChangeGuard {
    pub fn new(ask_once: bool) -> Self {
        Self {
            ask_once,
            prompted: false,
            armed: true,
        }
    }

    /// Compares the in-memory record with a fresh read of the durable file.
    pub fn is_dirty(record: &PreferenceRecord, store: &ConfigStore) -> Result<bool> {
        Ok(*record != store.load()?)
    }

    pub fn on_close_attempt(
        &mut self,
        record: &PreferenceRecord,
        store: &ConfigStore,
    ) -> Result<CloseVerdict> {
        if !self.armed || !Self::is_dirty(record, store)? {
            return Ok(CloseVerdict::Close);
        }
        if self.ask_once && self.prompted {
            return Ok(CloseVerdict::Close);
        }
        self.prompted = true;
        Ok(CloseVerdict::Prompt)
    }

    pub fn on_decision(&mut self, decision: CloseDecision) -> DecisionOutcome {
        match decision {
            CloseDecision::Cancel => {
                self.prompted = false;
                DecisionOutcome::Stay
            }
            CloseDecision::SaveAndClose => DecisionOutcome::SaveAndClose,
            CloseDecision::DiscardAndClose => DecisionOutcome::DiscardAndClose,
        }
    }

    /// Stops guarding for the rest of the session.
    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_store(name: &str) -> ConfigStore {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        let store = ConfigStore::with_path(
            env::temp_dir().join(format!("jira-settings-guard-{name}-{nanos}/config.json")),
        );
        store.ensure_parent_dir().expect("create temp directory");
        store
    }

    fn cleanup(store: &ConfigStore) {
        if let Some(parent) = store.path().parent() {
            let _ = fs::remove_dir_all(parent);
        }
    }

    fn dirty_record(store: &ConfigStore) -> PreferenceRecord {
        let mut record = store.load().expect("load");
        record.user = "changed".into();
        record
    }

    #[test]
    fn clean_record_closes_without_prompt() {
        let store = temp_store("clean");
        let record = store.load().expect("load");
        let mut guard = ChangeGuard::new(false);

        assert!(!ChangeGuard::is_dirty(&record, &store).expect("compare"));
        assert_eq!(
            guard.on_close_attempt(&record, &store).expect("close"),
            CloseVerdict::Close
        );
        cleanup(&store);
    }

    #[test]
    fn any_mutation_makes_record_dirty() {
        let store = temp_store("mutation");
        let mut record = store.load().expect("load");
        record.bookmarks[0].cache += 1;
        assert!(ChangeGuard::is_dirty(&record, &store).expect("compare"));
        cleanup(&store);
    }

    #[test]
    fn dirty_check_rereads_the_file() {
        let store = temp_store("reread");
        let record = dirty_record(&store);
        assert!(ChangeGuard::is_dirty(&record, &store).expect("compare"));

        store.persist(&record).expect("persist");
        assert!(!ChangeGuard::is_dirty(&record, &store).expect("compare"));
        cleanup(&store);
    }

    #[test]
    fn normal_mode_prompts_on_every_dirty_close() {
        let store = temp_store("normal");
        let record = dirty_record(&store);
        let mut guard = ChangeGuard::new(false);

        for _ in 0..3 {
            assert_eq!(
                guard.on_close_attempt(&record, &store).expect("close"),
                CloseVerdict::Prompt
            );
        }
        cleanup(&store);
    }

    #[test]
    fn ask_once_mode_prompts_only_first_time() {
        let store = temp_store("askonce");
        let record = dirty_record(&store);
        let mut guard = ChangeGuard::new(true);

        assert_eq!(
            guard.on_close_attempt(&record, &store).expect("close"),
            CloseVerdict::Prompt
        );
        assert_eq!(
            guard.on_close_attempt(&record, &store).expect("close"),
            CloseVerdict::Close
        );
        cleanup(&store);
    }

    #[test]
    fn cancel_rearms_prompt_and_keeps_record_dirty() {
        let store = temp_store("cancel");
        let record = dirty_record(&store);
        let mut guard = ChangeGuard::new(true);

        assert_eq!(
            guard.on_close_attempt(&record, &store).expect("close"),
            CloseVerdict::Prompt
        );
        assert_eq!(guard.on_decision(CloseDecision::Cancel), DecisionOutcome::Stay);
        assert!(ChangeGuard::is_dirty(&record, &store).expect("compare"));
        assert_eq!(
            guard.on_close_attempt(&record, &store).expect("close"),
            CloseVerdict::Prompt
        );
        cleanup(&store);
    }

    #[test]
    fn decisions_map_to_outcomes() {
        let mut guard = ChangeGuard::new(false);
        assert_eq!(
            guard.on_decision(CloseDecision::SaveAndClose),
            DecisionOutcome::SaveAndClose
        );
        assert_eq!(
            guard.on_decision(CloseDecision::DiscardAndClose),
            DecisionOutcome::DiscardAndClose
        );
    }

    #[test]
    fn disarmed_guard_never_prompts() {
        let store = temp_store("disarmed");
        let record = dirty_record(&store);
        let mut guard = ChangeGuard::new(false);
        guard.disarm();
        assert_eq!(
            guard.on_close_attempt(&record, &store).expect("close"),
            CloseVerdict::Close
        );
        cleanup(&store);
    }
}
