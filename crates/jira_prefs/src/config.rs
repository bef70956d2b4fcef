pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_BOOKMARK_CACHE_MS: u64 = 900_000;
pub const HTTP_PREFIX: &str = "http://";
pub const HTTPS_PREFIX: &str = "https://";
