//! Startup configuration from the environment.
use crate::model::DEFAULT_COUNTER;
use std::{env, fmt::Display, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Counter the station boards are scoped to.
    pub counter: String,
    /// Request buffer of every actor.
    pub channel_capacity: usize,
    /// Seconds between full board refreshes.
    pub refresh_secs: u64,
    /// Newest audit records considered by a query.
    pub audit_limit: usize,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, falling back to defaults
    /// for missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = Self {
            counter: try_load(&lookup, "CANTEEN_COUNTER", DEFAULT_COUNTER)?,
            channel_capacity: try_load(&lookup, "CANTEEN_CHANNEL_CAPACITY", "32")?,
            refresh_secs: try_load(&lookup, "CANTEEN_REFRESH_SECS", "30")?,
            audit_limit: try_load(&lookup, "CANTEEN_AUDIT_LIMIT", "500")?,
        };
        if config.channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "CANTEEN_CHANNEL_CAPACITY",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        if config.refresh_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "CANTEEN_REFRESH_SECS",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(config)
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            counter: DEFAULT_COUNTER.to_string(),
            channel_capacity: 32,
            refresh_secs: 30,
            audit_limit: 500,
        }
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: value.clone(),
            reason: e.to_string(),
        }
    })
}
