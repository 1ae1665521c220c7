//! # System Constants
//!
//! Defaults, environment variable names and lifecycle states that define the
//! operational boundaries of the fulfillment engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in configuration defaults
pub mod defaults {
    pub const WORKER_COUNT: usize = 4;
    pub const CLIENT_TIMEOUT_MS: u64 = 1000;
    pub const LOG_LEVEL: &str = "info";
}

/// Environment variables read by the configuration and logging layers
pub mod env_vars {
    /// Prefix for configuration overrides, e.g. `CYRK_WORKERS`
    pub const PREFIX: &str = "CYRK";
    pub const CONFIG_PATH: &str = "CYRK_CONFIG_PATH";
    pub const ENVIRONMENT: &str = "CYRK_ENV";
}

/// Thread naming
pub mod threads {
    pub const WORKER_PREFIX: &str = "cyrk-worker";
    pub const STATION_PREFIX: &str = "cyrk-station";
}

/// Lifecycle of an order from submission until its result slot is consumed
///
/// ```text
/// Queued -> Dispatched -> Ready -> PickedUp
///                     \        \-> Expired
///                      \-> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    /// Waiting for a free worker
    Queued,
    /// Claimed by a worker, production jobs are in flight
    Dispatched,
    /// Every product was made, waiting for the client
    Ready,
    /// At least one station failed; collectible as a fulfillment failure
    Failed,
    /// The client collected before the pickup timeout
    PickedUp,
    /// The pickup timeout elapsed; products went back to their stations
    Expired,
}

impl OrderState {
    /// States in which `collect_order` consumes the result slot
    pub fn is_collectible(self) -> bool {
        matches!(self, OrderState::Ready | OrderState::Failed | OrderState::Expired)
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderState::Queued => "queued",
            OrderState::Dispatched => "dispatched",
            OrderState::Ready => "ready",
            OrderState::Failed => "failed",
            OrderState::PickedUp => "picked_up",
            OrderState::Expired => "expired",
        };
        f.write_str(name)
    }
}
