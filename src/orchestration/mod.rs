//! # Orchestration Engine
//!
//! Thread-based order fulfillment: clients submit orders, order workers fan them out
//! into production jobs, and one runner per station makes products in order-id order.
//!
//! ## Architecture
//!
//! - **System**: Public entry point; validates orders, hands out pagers, collects results
//!   and runs the two-phase shutdown
//! - **OrderWorker**: Claims orders FIFO, dispatches jobs, and holds finished orders
//!   for pickup until the client timeout elapses
//! - **StationRunner**: Serves its station's job queue, lowest order id first, and takes
//!   the station off the menu on the first failure
//! - **JobQueue**: Per-station priority queue of production jobs
//! - **Pager**: Client handle that buzzes once the order is ready or has failed
//!
//! Every thread coordinates through a single lock over the shared engine state with
//! one condition variable per wait reason.

pub mod job_queue;
pub mod order;
pub(crate) mod order_worker;
pub mod report;
pub mod signal;
pub(crate) mod state;
pub(crate) mod station_runner;
pub mod system;

// Re-export core types and components for easy access
pub use job_queue::{JobQueue, JobResult, ProductionJob};
pub use order::{OrderId, OrderReadiness, Pager};
pub use report::{ShutdownSummary, WorkerReport};
pub use signal::{oneshot, OneshotReceiver, OneshotSender, SignalStatus};
pub use system::System;
