//! Bookmark editing state for the settings window.
//!
//! Exactly one edit target exists at any time: either a bookmark already in
//! the record (edited in place) or a draft that is appended on commit.

use jira_prefs::{format_duration, Bookmark, PreferenceRecord, PrefsError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    /// Not yet part of the record.
    Draft(Bookmark),
    /// Position of a bookmark in the record, edited in place.
    Existing(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkEditor {
    in_edit: bool,
    target: EditTarget,
    cache_label: String,
}

impl Default for BookmarkEditor {
    fn default() -> Self {
        let draft = Bookmark::default();
        let cache_label = format_duration(draft.cache);
        Self {
            in_edit: false,
            target: EditTarget::Draft(draft),
            cache_label,
        }
    }
}

fn out_of_range(index: usize, record: &PreferenceRecord) -> PrefsError {
    PrefsError::BookmarkIndexOutOfRange {
        index,
        len: record.bookmarks.len(),
    }
}

impl BookmarkEditor {
    pub fn in_edit(&self) -> bool {
        self.in_edit
    }

    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    /// Cache lifetime of the edit target, e.g. `"15 minutes"`.
    pub fn cache_label(&self) -> &str {
        &self.cache_label
    }

    /// The bookmark currently being edited.
    pub fn current<'a>(&'a self, record: &'a PreferenceRecord) -> Result<&'a Bookmark> {
        match &self.target {
            EditTarget::Draft(draft) => Ok(draft),
            EditTarget::Existing(index) => record
                .bookmarks
                .get(*index)
                .ok_or_else(|| out_of_range(*index, record)),
        }
    }

    fn current_mut<'a>(&'a mut self, record: &'a mut PreferenceRecord) -> Result<&'a mut Bookmark> {
        match &mut self.target {
            EditTarget::Draft(draft) => Ok(draft),
            EditTarget::Existing(index) => {
                let index = *index;
                let len = record.bookmarks.len();
                record
                    .bookmarks
                    .get_mut(index)
                    .ok_or(PrefsError::BookmarkIndexOutOfRange { index, len })
            }
        }
    }

    /// Opens the bookmark at `index` for in-place editing.
    pub fn start_edit(&mut self, record: &PreferenceRecord, index: usize) -> Result<()> {
        let bookmark = record
            .bookmarks
            .get(index)
            .ok_or_else(|| out_of_range(index, record))?;
        self.cache_label = format_duration(bookmark.cache);
        self.target = EditTarget::Existing(index);
        self.in_edit = true;
        Ok(())
    }

    /// Opens the editor on whatever draft is pending.
    pub fn start_new(&mut self) {
        if let EditTarget::Existing(_) = self.target {
            self.reset();
        }
        self.in_edit = true;
    }

    pub fn set_name(&mut self, record: &mut PreferenceRecord, name: &str) -> Result<()> {
        self.current_mut(record)?.name = name.to_string();
        Ok(())
    }

    pub fn set_query(&mut self, record: &mut PreferenceRecord, query: &str) -> Result<()> {
        self.current_mut(record)?.query = query.to_string();
        Ok(())
    }

    /// Updates the cache lifetime and recomputes the label.
    pub fn set_cache(&mut self, record: &mut PreferenceRecord, milliseconds: u64) -> Result<()> {
        self.current_mut(record)?.cache = milliseconds;
        self.cache_label = format_duration(milliseconds);
        Ok(())
    }

    /// Appends `bookmark` when given, then closes the editor and resets the
    /// target to a fresh default draft.
    pub fn commit(&mut self, record: &mut PreferenceRecord, bookmark: Option<Bookmark>) {
        if let Some(bookmark) = bookmark {
            record.bookmarks.push(bookmark);
        }
        self.reset();
    }

    /// Commits the current target: a draft is appended, an in-place edit is
    /// already part of the record.
    pub fn save(&mut self, record: &mut PreferenceRecord) {
        let draft = match std::mem::replace(&mut self.target, EditTarget::Existing(0)) {
            EditTarget::Draft(draft) => Some(draft),
            EditTarget::Existing(_) => None,
        };
        self.commit(record, draft);
    }

    /// Deletes the bookmark at `index` and keeps the edit target pointing at
    /// the same bookmark, or back at a draft if that one was removed.
    pub fn remove(&mut self, record: &mut PreferenceRecord, index: usize) -> Result<Bookmark> {
        let removed = record.remove_bookmark(index)?;
        if let EditTarget::Existing(current) = self.target {
            if current == index {
                self.reset();
            } else if current > index {
                self.target = EditTarget::Existing(current - 1);
            }
        }
        Ok(removed)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
