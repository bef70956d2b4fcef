use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::DEFAULT_BOOKMARK_CACHE_MS;

fn default_cache() -> u64 {
    DEFAULT_BOOKMARK_CACHE_MS
}

/// A named saved search with its own result cache lifetime in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_cache")]
    pub cache: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Bookmark {
    /// Creates a bookmark with the given label and query and the default
    /// 15 minute cache.
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
            ..Self::default()
        }
    }
}

impl Default for Bookmark {
    /// Blank bookmark used as the editor placeholder; cache is 900000 ms.
    fn default() -> Self {
        Self {
            name: String::new(),
            query: String::new(),
            cache: default_cache(),
            extra: Map::new(),
        }
    }
}
