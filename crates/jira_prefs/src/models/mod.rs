mod bookmark;
mod options;
mod record;
mod sort;

pub use bookmark::Bookmark;
pub use options::{OptionEntry, OptionKey, OptionSet};
pub use record::PreferenceRecord;
pub use sort::{available_sort_fields, SortField, SortFieldName};
