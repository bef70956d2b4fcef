//! File-backed store for the preference record.

use jira_prefs::{PreferenceRecord, PrefsError, Result, CONFIG_FILE_NAME};
use log::debug;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Launcher-provided per-workflow data directory.
const WORKFLOW_DATA_ENV: &str = "alfred_workflow_data";

/// Loads and saves the preference record as pretty-printed JSON.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Binds to `config.json` in the workflow data directory, or the platform
    /// config directory when not launched from a workflow.
    pub fn new() -> Result<Self> {
        let dir = match env::var_os(WORKFLOW_DATA_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => directories::ProjectDirs::from("com", "alfred-jira", "alfred-jira")
                .ok_or(PrefsError::ConfigLocation)?
                .config_dir()
                .to_path_buf(),
        };
        Ok(Self::with_path(dir.join(CONFIG_FILE_NAME)))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the directory holding the config file. `persist` never does.
    pub fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Reads the record. A missing file is the empty record with defaults;
    /// unreadable or malformed content is an error.
    pub fn load(&self) -> Result<PreferenceRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(PreferenceRecord::default())
            }
            Err(err) => return Err(PrefsError::Io(err)),
        };
        serde_json::from_str(&content).map_err(|err| PrefsError::parse(&self.path, err))
    }

    /// Overwrites the file with `record`, two-space indented.
    pub fn persist(&self, record: &PreferenceRecord) -> Result<()> {
        let content = serde_json::to_string_pretty(record)
            .map_err(|err| PrefsError::write(&self.path, io::Error::from(err)))?;
        fs::write(&self.path, content).map_err(|err| PrefsError::write(&self.path, err))?;
        debug!("Preferences written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigStore;
    use jira_prefs::{
        Bookmark, OptionEntry, PreferenceRecord, PrefsError, SortField, SortFieldName,
    };
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        env::temp_dir().join(format!("jira-settings-tests-{name}-{nanos}/config.json"))
    }

    fn store_in_fresh_dir(name: &str) -> ConfigStore {
        let store = ConfigStore::with_path(unique_path(name));
        store.ensure_parent_dir().expect("create temp directory");
        store
    }

    fn cleanup(store: &ConfigStore) {
        if let Some(parent) = store.path().parent() {
            let _ = fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn load_missing_file_returns_default_record() {
        let store = ConfigStore::with_path(unique_path("missing"));
        let loaded = store.load().expect("missing file is not an error");
        assert_eq!(loaded, PreferenceRecord::default());
    }

    #[test]
    fn persist_and_load_round_trip() {
        let store = store_in_fresh_dir("roundtrip");

        let mut record = PreferenceRecord {
            url: "https://jira.example.com/".to_string(),
            user: "jdoe".to_string(),
            ssl: Some(true),
            sort: vec![SortField::new(SortFieldName::DueDate)],
            ..PreferenceRecord::default()
        };
        let mut bookmark = Bookmark::new("Sprint", "sprint in openSprints()");
        bookmark.cache = 60_000;
        record.bookmarks.push(bookmark);
        record
            .options
            .available_projects
            .push(OptionEntry::new("PRJ", Some(true)));

        store.persist(&record).expect("persist should succeed");
        let loaded = store.load().expect("load should succeed");
        assert_eq!(loaded, record);

        let raw = fs::read_to_string(store.path()).expect("read back");
        assert!(raw.contains("\n  \"url\": \"https://jira.example.com/\""));

        cleanup(&store);
    }

    #[test]
    fn load_invalid_json_is_a_parse_error() {
        let store = store_in_fresh_dir("invalid");
        fs::write(store.path(), "not-valid-json").expect("write invalid config");

        match store.load() {
            Err(PrefsError::Parse { path, .. }) => assert_eq!(path, store.path()),
            other => panic!("expected parse error, got {other:?}"),
        }

        cleanup(&store);
    }

    #[test]
    fn persist_without_parent_directory_is_a_write_error() {
        let store = ConfigStore::with_path(unique_path("noparent"));
        let result = store.persist(&PreferenceRecord::default());
        assert!(matches!(result, Err(PrefsError::Write { .. })));
        assert!(!store.path().exists());
    }
}
