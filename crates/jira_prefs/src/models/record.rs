//! The durable preference record and its in-place edit operations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::bookmark::Bookmark;
use super::options::OptionSet;
use super::sort::{available_sort_fields, SortField, SortFieldName};
use crate::error::{PrefsError, Result};
use crate::url::{detect_ssl, normalize_trailing_slash};

/// Sort order used when the file has none.
fn default_sort() -> Vec<SortField> {
    vec![
        SortField::new(SortFieldName::Priority),
        SortField::new(SortFieldName::Updated),
    ]
}

/// Bookmarks offered when the file has none.
fn default_bookmarks() -> Vec<Bookmark> {
    vec![
        Bookmark::new(
            "Assigned to me",
            "assignee = currentUser() AND resolution = Unresolved",
        ),
        Bookmark::new(
            "Reported by me",
            "reporter = currentUser() AND resolution = Unresolved",
        ),
        Bookmark::new("Watching", "watcher = currentUser() AND resolution = Unresolved"),
    ]
}

/// Everything the settings window persists, as stored in `config.json`.
/// Unknown top-level keys are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceRecord {
    pub url: String,
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
    pub sort: Vec<SortField>,
    pub bookmarks: Vec<Bookmark>,
    pub options: OptionSet,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for PreferenceRecord {
    fn default() -> Self {
        Self {
            url: String::new(),
            user: String::new(),
            ssl: None,
            sort: default_sort(),
            bookmarks: default_bookmarks(),
            options: OptionSet::default(),
            extra: Map::new(),
        }
    }
}

impl PreferenceRecord {
    /// Effective SSL toggle: the stored flag, or https unless the stored URL
    /// literally uses `http://`.
    pub fn uses_ssl(&self) -> bool {
        self.ssl.unwrap_or_else(|| detect_ssl(&self.url))
    }

    /// Collapses trailing slashes on the stored URL into one.
    pub fn normalize_url(&mut self) {
        self.url = normalize_trailing_slash(&self.url);
    }

    /// Choices for the sort slot at `position`. `position == sort.len()` is
    /// the slot for appending a new field.
    pub fn sort_choices(&self, position: usize) -> Result<Vec<SortFieldName>> {
        if position > self.sort.len() {
            return Err(PrefsError::SortPositionOutOfRange {
                position,
                len: self.sort.len(),
            });
        }
        let current = self.sort.get(position).map(|field| field.name);
        Ok(available_sort_fields(&self.sort, current))
    }

    /// Puts `name` at `position`, keeping any extra keys of the replaced entry.
    pub fn set_sort_field(&mut self, position: usize, name: SortFieldName) -> Result<()> {
        let len = self.sort.len();
        if position >= len {
            return Err(PrefsError::SortPositionOutOfRange { position, len });
        }
        let in_use_elsewhere = self
            .sort
            .iter()
            .enumerate()
            .any(|(index, field)| index != position && field.name == name);
        if in_use_elsewhere {
            return Err(PrefsError::SortFieldInUse(name.to_string()));
        }
        self.sort[position].name = name;
        Ok(())
    }

    /// Appends the first unused field. Returns `None` when all are in use.
    pub fn add_sort_field(&mut self) -> Option<SortFieldName> {
        let next = available_sort_fields(&self.sort, None).into_iter().next()?;
        self.sort.push(SortField::new(next));
        Some(next)
    }

    pub fn remove_sort_field(&mut self, position: usize) -> Result<SortField> {
        let len = self.sort.len();
        if position >= len {
            return Err(PrefsError::SortPositionOutOfRange { position, len });
        }
        Ok(self.sort.remove(position))
    }

    /// Removes the bookmark at `index`; later bookmarks shift down by one.
    pub fn remove_bookmark(&mut self, index: usize) -> Result<Bookmark> {
        let len = self.bookmarks.len();
        if index >= len {
            return Err(PrefsError::BookmarkIndexOutOfRange { index, len });
        }
        Ok(self.bookmarks.remove(index))
    }
}
