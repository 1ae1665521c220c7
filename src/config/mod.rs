//! # Engine Configuration
//!
//! Typed configuration for the fulfillment engine. Values come from layered sources
//! (built-in defaults, an optional file, then `CYRK_*` environment variables) and are
//! validated before a [`crate::System`] is built from them.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cyrk_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let timeout = manager.config().client_timeout();
//! let workers = manager.config().workers;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::defaults;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Number of order worker threads
    pub workers: usize,

    /// How long a ready order waits for pickup before it expires
    pub client_timeout_ms: u64,

    /// Log output settings
    pub logging: LoggingConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            workers: defaults::WORKER_COUNT,
            client_timeout_ms: defaults::CLIENT_TIMEOUT_MS,
            logging: LoggingConfig::default(),
        }
    }
}

impl SystemConfig {
    pub fn new(workers: usize, client_timeout: Duration) -> Self {
        Self {
            workers,
            client_timeout_ms: u64::try_from(client_timeout.as_millis()).unwrap_or(u64::MAX),
            ..Self::default()
        }
    }

    pub fn client_timeout(&self) -> Duration {
        Duration::from_millis(self.client_timeout_ms)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.workers == 0 {
            return Err(ConfigurationError::invalid_value(
                "workers",
                self.workers.to_string(),
                "at least one worker is required",
            ));
        }

        if self.client_timeout_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "client_timeout_ms",
                self.client_timeout_ms.to_string(),
                "pickup timeout must be at least 1ms",
            ));
        }

        self.logging.validate()
    }
}

/// Logging output configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `cyrk_core=debug`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.level.trim().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "logging.level",
                self.level.clone(),
                "log level must not be empty",
            ));
        }
        Ok(())
    }
}
