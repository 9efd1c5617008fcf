//! Configuration management module
//!
//! The query layer has one tunable that matters: how long a find may keep
//! polling before it gives up. Values come from defaults, an optional JSON or
//! YAML file, then environment overrides, in that order.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use action_locator::RetryConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Overrides `max_wait_time_ms`. Accepts "1500", "2s", "750ms".
pub const ENV_MAX_WAIT_TIME: &str = "SOUL_QUERY_MAX_WAIT_TIME";

/// Overrides `poll_interval_ms`. Same formats as [`ENV_MAX_WAIT_TIME`].
pub const ENV_POLL_INTERVAL: &str = "SOUL_QUERY_POLL_INTERVAL";

/// Settings read once when the query layer is built.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QueryConfig {
    /// Wait budget per find. Zero or negative means a single attempt.
    pub max_wait_time_ms: i64,

    /// Pause between attempts
    pub poll_interval_ms: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_wait_time_ms: 2_000,
            poll_interval_ms: 25,
        }
    }
}

/// Errors surfaced while loading query configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to deserialize query config: {0}")]
    Deserialize(String),
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl QueryConfig {
    pub fn max_wait_time(&self) -> Duration {
        Duration::from_millis(self.max_wait_time_ms.max(0) as u64)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Retry settings handed to the finder.
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new(self.max_wait_time()).with_poll_interval(self.poll_interval())
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env_overrides()
    }

    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(raw) = std::env::var(ENV_MAX_WAIT_TIME) {
            self.max_wait_time_ms = parse_signed_millis(&raw).map_err(|reason| {
                ConfigError::InvalidEnv {
                    var: ENV_MAX_WAIT_TIME,
                    value: raw.clone(),
                    reason,
                }
            })?;
            debug!(max_wait_time_ms = self.max_wait_time_ms, "max wait time from environment");
        }

        if let Ok(raw) = std::env::var(ENV_POLL_INTERVAL) {
            self.poll_interval_ms = parse_millis(&raw).map_err(|reason| ConfigError::InvalidEnv {
                var: ENV_POLL_INTERVAL,
                value: raw.clone(),
                reason,
            })?;
            debug!(poll_interval_ms = self.poll_interval_ms, "poll interval from environment");
        }

        Ok(self)
    }
}

pub fn load_config_from_reader<R: Read>(mut reader: R) -> Result<QueryConfig, ConfigError> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    parse_config_str(&buf)
}

pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<QueryConfig, ConfigError> {
    let file = File::open(path.as_ref())?;
    load_config_from_reader(file)
}

pub fn parse_config_str(raw: &str) -> Result<QueryConfig, ConfigError> {
    match serde_json::from_str(raw) {
        Ok(config) => Ok(config),
        Err(json_err) => serde_yaml::from_str(raw).map_err(|yaml_err| {
            ConfigError::Deserialize(format!(
                "json error: {}; yaml error: {}",
                json_err, yaml_err
            ))
        }),
    }
}

/// Load configuration from defaults, an optional file, and the environment.
///
/// A missing file is not an error; the defaults are used instead.
pub fn load_configuration(config_file: Option<&Path>) -> Result<QueryConfig, ConfigError> {
    let config = match config_file {
        Some(path) if path.exists() => {
            info!(path = %path.display(), "Loading query configuration");
            load_config_from_path(path)?
        }
        _ => QueryConfig::default(),
    };
    config.apply_env_overrides()
}

fn parse_millis(raw: &str) -> Result<u64, String> {
    let trimmed = raw.trim();
    if let Ok(ms) = trimmed.parse::<u64>() {
        return Ok(ms);
    }
    humantime::parse_duration(trimmed)
        .map(|duration| duration.as_millis() as u64)
        .map_err(|err| err.to_string())
}

fn parse_signed_millis(raw: &str) -> Result<i64, String> {
    if let Ok(ms) = raw.trim().parse::<i64>() {
        return Ok(ms);
    }
    parse_millis(raw).map(|ms| ms.min(i64::MAX as u64) as i64)
}
