//! Typed preference model shared by the settings window backend.

pub mod config;
pub mod duration;
pub mod error;
pub mod models;
pub mod url;

pub use config::{CONFIG_FILE_NAME, DEFAULT_BOOKMARK_CACHE_MS};
pub use duration::format_duration;
pub use error::{PrefsError, Result};
pub use models::{
    Bookmark, OptionEntry, OptionKey, OptionSet, PreferenceRecord, SortField, SortFieldName,
};
