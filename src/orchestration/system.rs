//! # Fulfillment System
//!
//! The orchestrator: owns the stations, the shared state and every thread. Clients
//! place orders, wait on the returned [`Pager`], and collect the finished order
//! before the pickup timeout elapses.
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use cyrk_core::station::SharedStation;
//! use cyrk_core::test_utils::{Burger, SimulatedStation};
//! use cyrk_core::System;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let stations: HashMap<String, SharedStation> = HashMap::from([(
//!     "burger".to_string(),
//!     Arc::new(SimulatedStation::of::<Burger>()) as SharedStation,
//! )]);
//! let system = System::new(stations, 2, Duration::from_secs(1))?;
//!
//! let pager = system.order(["burger"])?;
//! pager.wait();
//! let products = system.collect_order(&pager)?;
//! assert_eq!(products.len(), 1);
//!
//! let reports = system.shutdown();
//! assert_eq!(reports.len(), 2);
//! # Ok(())
//! # }
//! ```

use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::order::{Order, OrderId, Pager};
use super::order_worker::OrderWorker;
use super::report::{ShutdownSummary, WorkerReport};
use super::signal::oneshot;
use super::state::{OrderSlot, Shared};
use super::station_runner::StationRunner;
use crate::config::SystemConfig;
use crate::constants::{threads, OrderState};
use crate::error::{OrderError, Result, SystemError};
use crate::station::{BoxedProduct, SharedStation};

#[derive(Default)]
struct Threads {
    workers: Vec<JoinHandle<WorkerReport>>,
    runners: Vec<JoinHandle<()>>,
}

/// Concurrent order-fulfillment engine
pub struct System {
    shared: Arc<Shared>,
    /// `None` once shut down
    threads: Mutex<Option<Threads>>,
}

impl System {
    /// Start every station, then spawn `workers` order workers and one runner per station
    pub fn new(
        stations: HashMap<String, SharedStation>,
        workers: usize,
        client_timeout: Duration,
    ) -> std::result::Result<Self, SystemError> {
        Self::from_config(stations, &SystemConfig::new(workers, client_timeout))
    }

    pub fn from_config(
        stations: HashMap<String, SharedStation>,
        config: &SystemConfig,
    ) -> std::result::Result<Self, SystemError> {
        config.validate()?;
        if stations.is_empty() {
            return Err(SystemError::NoStations);
        }

        let shared = Arc::new(Shared::new(stations, config.client_timeout()));
        for handle in shared.stations.values() {
            handle.station.start();
        }

        // Dropping a partially started system shuts down whatever did start
        let system = Self {
            shared,
            threads: Mutex::new(Some(Threads::default())),
        };
        system.spawn_runners()?;
        system.spawn_workers(config.workers)?;

        crate::log_system!(info, "STARTED",
            workers: config.workers,
            stations: system.shared.stations.len(),
            client_timeout_ms: config.client_timeout_ms
        );

        Ok(system)
    }

    fn spawn_runners(&self) -> std::result::Result<(), SystemError> {
        for (product, handle) in &self.shared.stations {
            let name = format!("{}-{}", threads::STATION_PREFIX, product);
            let runner = StationRunner::new(Arc::clone(handle), Arc::clone(&self.shared));
            let join = thread::Builder::new()
                .name(name.clone())
                .spawn(move || runner.run())
                .map_err(|source| SystemError::ThreadSpawn { name, source })?;

            if let Some(threads) = self.threads.lock().as_mut() {
                threads.runners.push(join);
            }
        }
        Ok(())
    }

    fn spawn_workers(&self, count: usize) -> std::result::Result<(), SystemError> {
        for index in 0..count {
            let name = format!("{}-{}", threads::WORKER_PREFIX, index);
            let worker = OrderWorker::new(index, Arc::clone(&self.shared));
            let join = thread::Builder::new()
                .name(name.clone())
                .spawn(move || worker.run())
                .map_err(|source| SystemError::ThreadSpawn { name, source })?;

            if let Some(threads) = self.threads.lock().as_mut() {
                threads.workers.push(join);
            }
        }
        Ok(())
    }

    /// Place an order for the named products
    ///
    /// Fails with `Closed` once shutdown has begun, or with `InvalidProduct` if any
    /// product is not on the menu. No order id is allocated when it fails.
    pub fn order<I, S>(&self, products: I) -> Result<Pager>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let products: Vec<String> = products.into_iter().map(Into::into).collect();

        let mut state = self.shared.state.lock();
        if state.closed {
            return Err(OrderError::Closed);
        }
        if let Some(missing) = products.iter().find(|p| !state.menu.contains(p.as_str())) {
            let product = missing.clone();
            drop(state);
            crate::log_order!(debug, "REJECTED", product: product);
            return Err(OrderError::InvalidProduct { product });
        }

        let order_id = state.next_order_id;
        state.next_order_id += 1;

        let (ready, buzzer) = oneshot();
        let (result, result_slot) = oneshot();
        state.slots.insert(order_id, OrderSlot::new(result_slot));
        state.pending.insert(order_id);
        state.unassigned.push_back(Order {
            id: order_id,
            products,
            ready,
            result,
        });
        self.shared.free_workers.notify_one();
        drop(state);

        crate::log_order!(debug, "ACCEPTED", order_id: order_id);
        Ok(Pager::new(order_id, buzzer))
    }

    /// Collect a finished order
    ///
    /// Succeeds at most once per pager. Blocks only while the owning worker hands
    /// over the products or finishes returning them to their stations.
    pub fn collect_order(&self, pager: &Pager) -> Result<Vec<BoxedProduct>> {
        let order_id = pager.id();

        let result = {
            let mut state = self.shared.state.lock();
            let slot = state
                .slots
                .get_mut(&order_id)
                .filter(|slot| slot.result.is_some())
                .ok_or(OrderError::UnknownPager { order_id })?;

            match slot.state {
                OrderState::Ready => {
                    slot.state = OrderState::PickedUp;
                    slot.pickup.notify_all();
                }
                OrderState::Failed | OrderState::Expired => {}
                OrderState::Queued | OrderState::Dispatched | OrderState::PickedUp => {
                    return Err(OrderError::NotReady { order_id });
                }
            }

            let result = slot.result.take();
            if slot.state != OrderState::PickedUp {
                // The worker is done with failed and expired orders
                state.slots.remove(&order_id);
            }
            result
        };

        match result.and_then(|slot| slot.wait()) {
            Some(outcome) => outcome,
            None => Err(OrderError::FulfillmentFailure { order_id }),
        }
    }

    /// Products that can currently be ordered
    pub fn menu(&self) -> BTreeSet<String> {
        self.shared.state.lock().menu.clone()
    }

    /// Orders accepted but not yet collected, failed or expired
    pub fn pending_orders(&self) -> BTreeSet<OrderId> {
        self.shared.state.lock().pending.clone()
    }

    pub fn client_timeout(&self) -> Duration {
        self.shared.client_timeout
    }

    /// Lifecycle state of an order whose result has not been consumed yet
    pub fn order_state(&self, order_id: OrderId) -> Option<OrderState> {
        self.shared.state.lock().order_state(order_id)
    }

    /// Number of queued production jobs per station
    pub fn station_backlog(&self) -> BTreeMap<String, usize> {
        let state = self.shared.state.lock();
        state
            .job_queues
            .iter()
            .map(|(product, queue)| (product.clone(), queue.len()))
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }

    /// Stop accepting orders, finish the accepted ones, join every thread and stop the stations
    ///
    /// Returns one report per worker. Calling it again returns an empty list.
    pub fn shutdown(&self) -> Vec<WorkerReport> {
        let Some(threads) = self.threads.lock().take() else {
            crate::log_system!(warn, "SHUTDOWN_REPEATED");
            return Vec::new();
        };

        {
            let mut state = self.shared.state.lock();
            state.closed = true;
            state.menu.clear();
        }
        self.shared.free_workers.notify_all();
        self.shared.wake_all_stations();

        let mut reports = Vec::with_capacity(threads.workers.len());
        for (index, worker) in threads.workers.into_iter().enumerate() {
            match worker.join() {
                Ok(report) => reports.push(report),
                Err(_) => {
                    crate::log_worker!(error, "PANICKED", worker: index);
                    reports.push(WorkerReport::default());
                }
            }
        }

        // Workers are gone, so no new jobs can appear
        self.shared.state.lock().stations_released = true;
        self.shared.wake_all_stations();
        for runner in threads.runners {
            if runner.join().is_err() {
                crate::log_system!(error, "STATION_RUNNER_PANICKED");
            }
        }

        for handle in self.shared.stations.values() {
            handle.station.stop();
        }

        let summary = ShutdownSummary::from_reports(&reports);
        crate::log_system!(info, "SHUTDOWN_COMPLETE",
            collected: summary.collected,
            abandoned: summary.abandoned,
            failed: summary.failed,
            failed_products: summary.failed_products
        );

        reports
    }
}

impl Drop for System {
    fn drop(&mut self) {
        let running = self.threads.lock().is_some();
        if running {
            self.shutdown();
        }
    }
}

impl std::fmt::Debug for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("System")
            .field("stations", &self.shared.stations.keys().collect::<Vec<_>>())
            .field("client_timeout", &self.shared.client_timeout)
            .field("closed", &self.is_closed())
            .finish()
    }
}
