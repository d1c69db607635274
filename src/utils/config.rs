//! Runtime settings for the route guide.

use std::path::PathBuf;
use std::str::FromStr;

/// Default location of the feature dataset.
pub const DEFAULT_JSON_FILE: &str = "data/route_guide_db.json";
/// Default capacity of the range query output channel.
pub const DEFAULT_LIST_BUFFER: usize = 16;
/// Default capacity of the chat relay output channel.
pub const DEFAULT_CHAT_BUFFER: usize = 16;

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the JSON feature dataset.
    pub json_file: PathBuf,

    /// Number of features the range query producer may run ahead of
    /// its consumer.
    pub list_buffer: usize,

    /// Number of relayed notes the chat relay may run ahead of its
    /// consumer.
    pub chat_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            json_file: PathBuf::from(DEFAULT_JSON_FILE),
            list_buffer: DEFAULT_LIST_BUFFER,
            chat_buffer: DEFAULT_CHAT_BUFFER,
        }
    }
}

impl Config {
    /// Builds a config from `ROUTE_GUIDE_*` environment variables,
    /// falling back to the defaults for anything unset or invalid.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        if let Some(path) = lookup("ROUTE_GUIDE_JSON_FILE") {
            config.json_file = PathBuf::from(path);
        }
        if let Some(raw) = lookup("ROUTE_GUIDE_LIST_BUFFER") {
            config.list_buffer = parse_buffer("ROUTE_GUIDE_LIST_BUFFER", &raw, DEFAULT_LIST_BUFFER);
        }
        if let Some(raw) = lookup("ROUTE_GUIDE_CHAT_BUFFER") {
            config.chat_buffer = parse_buffer("ROUTE_GUIDE_CHAT_BUFFER", &raw, DEFAULT_CHAT_BUFFER);
        }
        debug!("config: {:?}", config);
        config
    }
}

/// Channel capacities must be positive.
fn parse_buffer(key: &str, raw: &str, default: usize) -> usize {
    match usize::from_str(raw.trim()) {
        Ok(value) if value > 0 => value,
        _ => {
            warn!("Invalid {} value {:?}, using {}", key, raw, default);
            default
        }
    }
}
