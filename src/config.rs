use std::env;
use std::path::PathBuf;

use chrono::Weekday;

use crate::error::ConfigError;

pub const DATA_DIR_VAR: &str = "VOLUME_TRACKER_DATA_DIR";
pub const WEEK_START_VAR: &str = "VOLUME_TRACKER_WEEK_START";
pub const LOG_VAR: &str = "VOLUME_TRACKER_LOG";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Directory holding the persisted history and goals.
    pub data_dir: PathBuf,
    /// First day of a training week.
    pub week_start: Weekday,
    /// `tracing-subscriber` filter directive.
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup(DATA_DIR_VAR) {
            Some(dir) if dir.trim().is_empty() => return Err(ConfigError::Empty(DATA_DIR_VAR)),
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir(),
        };

        let week_start = match lookup(WEEK_START_VAR) {
            Some(name) => name
                .trim()
                .parse::<Weekday>()
                .map_err(|_| ConfigError::InvalidWeekStart(name))?,
            None => Weekday::Sun,
        };

        let log_filter = lookup(LOG_VAR)
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        Ok(Config {
            data_dir,
            week_start,
            log_filter,
        })
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("volume-tracker"))
        .unwrap_or_else(|| PathBuf::from("data"))
}
