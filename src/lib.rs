#![allow(clippy::doc_markdown)] // Allow technical terms in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Cyrk Core
//!
//! Concurrent order-fulfillment engine for a fast-food kitchen.
//!
//! ## Overview
//!
//! Clients order a list of products by name and receive a [`Pager`]. A fixed pool of
//! order workers dispatches each order to the production stations, one job per
//! product. Every station is driven by its own runner thread that makes products for
//! the lowest pending order id first. Once all products of an order are made the pager
//! buzzes and the client has a bounded time to collect; uncollected products go back
//! to the stations that made them.
//!
//! ## Key Features
//!
//! - **Ordered production**: Per-station priority by order id, FIFO within an order
//! - **Failure isolation**: A broken station fails its own jobs and leaves the menu,
//!   while every other product stays orderable
//! - **Exactly one outcome**: Every accepted order is collected, expired or failed,
//!   including orders still queued when shutdown begins
//! - **Graceful shutdown**: Workers drain the queue before station runners are released
//!
//! ## Module Organization
//!
//! - [`orchestration`] - The [`System`], order workers, station runners and job queues
//! - [`station`] - The [`Station`] capability and the opaque [`Product`] type
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup and macros
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use cyrk_core::config::SystemConfig;
//! use cyrk_core::station::SharedStation;
//! use cyrk_core::test_utils::{Burger, Fries, SimulatedStation};
//! use cyrk_core::System;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut stations: HashMap<String, SharedStation> = HashMap::new();
//! stations.insert("burger".into(), Arc::new(SimulatedStation::of::<Burger>()));
//! stations.insert("fries".into(), Arc::new(SimulatedStation::of::<Fries>()));
//!
//! let system = System::from_config(stations, &SystemConfig::default())?;
//! let pager = system.order(["burger", "fries"])?;
//! pager.wait();
//! let meal = system.collect_order(&pager)?;
//! assert_eq!(meal.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod orchestration;
pub mod station;
pub mod test_utils;

pub use config::{ConfigManager, LoggingConfig, SystemConfig};
pub use constants::OrderState;
pub use error::{OrderError, Result, StationError, SystemError};
pub use orchestration::{
    OrderId, OrderReadiness, Pager, ShutdownSummary, System, WorkerReport,
};
pub use station::{BoxedProduct, Product, SharedStation, Station};
