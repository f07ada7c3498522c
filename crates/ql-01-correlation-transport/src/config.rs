//! Transport configuration with validation.
//!
//! Calls wait indefinitely unless a timeout is configured, either here or
//! per call.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Environment variable for the default call timeout in milliseconds.
/// `0` or unset means "wait indefinitely".
pub const ENV_TIMEOUT_MS: &str = "QUILL_BRIDGE_TIMEOUT_MS";

/// Environment variable for the expiry sweeper period in milliseconds.
pub const ENV_SWEEP_MS: &str = "QUILL_BRIDGE_SWEEP_MS";

/// Main transport configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Timeout applied to every call unless overridden per call.
    /// `None` keeps a call pending until the host answers.
    #[serde(with = "humantime_serde")]
    pub default_timeout: Option<Duration>,
    /// How often `sweep_task` looks for expired entries
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_timeout: None,
            sweep_interval: Duration::from_secs(5),
        }
    }
}

impl BridgeConfig {
    /// Configuration with a default timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            default_timeout: Some(timeout),
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::InvalidTimeout(
                "default_timeout cannot be 0 (use none to disable)".into(),
            ));
        }

        if self.sweep_interval.is_zero() {
            return Err(ConfigError::InvalidSweepInterval(
                "sweep_interval cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QUILL_BRIDGE_TIMEOUT_MS`: default call timeout (default: none)
    /// - `QUILL_BRIDGE_SWEEP_MS`: sweeper period (default: 5000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`BridgeConfig::from_env`] with an injectable lookup.
    /// Unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let default_timeout = match lookup(ENV_TIMEOUT_MS).and_then(|v| v.trim().parse::<u64>().ok()) {
            Some(0) | None => defaults.default_timeout,
            Some(ms) => Some(Duration::from_millis(ms)),
        };

        let sweep_interval = lookup(ENV_SWEEP_MS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.sweep_interval);

        Self {
            default_timeout,
            sweep_interval,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    #[error("invalid sweep interval: {0}")]
    InvalidSweepInterval(String),
}
