//! # Error Types
//!
//! Structured error handling for the fulfillment engine using thiserror.
//!
//! Errors fall into three groups:
//!
//! - **Client usage** (`Closed`, `InvalidProduct`, `UnknownPager`, `NotReady`): returned
//!   synchronously and never change engine state.
//! - **Fulfillment** (`FulfillmentFailure`, `OrderExpired`): stored in an order's result
//!   slot and surfaced when the client collects.
//! - **Station** ([`StationError`]): internal and permanent. A failing station is removed
//!   from the menu and never retried.

use std::io;

use thiserror::Error;

use crate::config::ConfigurationError;
use crate::orchestration::OrderId;

/// Errors visible to clients of [`crate::System`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("System is closed: no further orders are accepted")]
    Closed,

    #[error("Product '{product}' is not on the menu")]
    InvalidProduct { product: String },

    #[error("Pager for order {order_id} is unknown or was already collected")]
    UnknownPager { order_id: OrderId },

    #[error("Order {order_id} is not ready for collection")]
    NotReady { order_id: OrderId },

    #[error("Order {order_id} could not be fulfilled: a station failed")]
    FulfillmentFailure { order_id: OrderId },

    #[error("Order {order_id} expired before it was collected")]
    OrderExpired { order_id: OrderId },
}

impl OrderError {
    /// True for outcomes stored in an order's result slot rather than raised at call time
    pub fn is_fulfillment_error(&self) -> bool {
        matches!(
            self,
            OrderError::FulfillmentFailure { .. } | OrderError::OrderExpired { .. }
        )
    }
}

/// Errors raised by a [`crate::station::Station`] implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StationError {
    /// The station broke down and will never produce again
    #[error("Station failure: {reason}")]
    Failure { reason: String },

    /// A returned product does not carry the type this station makes
    #[error("Returned product is not a {expected}")]
    InvalidProduct { expected: String },
}

impl StationError {
    pub fn failure(reason: impl Into<String>) -> Self {
        StationError::Failure {
            reason: reason.into(),
        }
    }
}

/// Errors raised while building or starting the engine
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("At least one station is required")]
    NoStations,

    #[error("Failed to spawn thread {name}: {source}")]
    ThreadSpawn {
        name: String,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OrderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_error_messages_name_the_order() {
        let err = OrderError::NotReady { order_id: 7 };
        assert_eq!(err.to_string(), "Order 7 is not ready for collection");

        let err = OrderError::InvalidProduct {
            product: "espresso".to_string(),
        };
        assert!(err.to_string().contains("espresso"));
    }

    #[test]
    fn test_fulfillment_classification() {
        assert!(OrderError::OrderExpired { order_id: 1 }.is_fulfillment_error());
        assert!(OrderError::FulfillmentFailure { order_id: 1 }.is_fulfillment_error());
        assert!(!OrderError::Closed.is_fulfillment_error());
        assert!(!OrderError::UnknownPager { order_id: 1 }.is_fulfillment_error());
        assert!(!OrderError::NotReady { order_id: 1 }.is_fulfillment_error());
    }

    #[test]
    fn test_system_error_wraps_configuration() {
        let err: SystemError = ConfigurationError::invalid_value("workers", "0", "must be at least 1").into();
        assert!(matches!(err, SystemError::Configuration(_)));
        assert!(err.to_string().contains("workers"));
    }
}
