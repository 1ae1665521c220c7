//! # Shared Engine State
//!
//! All cross-thread bookkeeping lives in [`SystemState`] behind one mutex. Each
//! independent wait reason has its own condition variable on that mutex: free
//! workers, one per station, and one per order awaiting pickup.

use parking_lot::{Condvar, Mutex};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use super::job_queue::JobQueue;
use super::order::{Order, OrderId, OrderOutcome};
use super::signal::OneshotReceiver;
use crate::constants::OrderState;
use crate::station::{BoxedProduct, SharedStation};

/// A station plus the condition its runner sleeps on
pub(crate) struct StationHandle {
    pub product: String,
    pub station: SharedStation,
    pub jobs_available: Condvar,
}

/// Bookkeeping for one order from submission until its result is consumed
pub(crate) struct OrderSlot {
    pub state: OrderState,
    /// Taken by the collecting client; `None` once collected
    pub result: Option<OneshotReceiver<OrderOutcome>>,
    pub pickup: Arc<Condvar>,
}

impl OrderSlot {
    pub fn new(result: OneshotReceiver<OrderOutcome>) -> Self {
        Self {
            state: OrderState::Queued,
            result: Some(result),
            pickup: Arc::new(Condvar::new()),
        }
    }
}

/// Everything guarded by the orchestrator lock
pub(crate) struct SystemState {
    /// No further orders are accepted; workers exit once the unassigned queue is empty
    pub closed: bool,
    /// Set after every worker has been joined; runners exit once their queue is empty
    pub stations_released: bool,
    pub next_order_id: OrderId,
    pub menu: BTreeSet<String>,
    pub pending: BTreeSet<OrderId>,
    pub unassigned: VecDeque<Order>,
    pub job_queues: HashMap<String, JobQueue>,
    pub slots: HashMap<OrderId, OrderSlot>,
}

impl SystemState {
    fn new<'a>(products: impl Iterator<Item = &'a String>) -> Self {
        let mut menu = BTreeSet::new();
        let mut job_queues = HashMap::new();
        for product in products {
            menu.insert(product.clone());
            job_queues.insert(product.clone(), JobQueue::new());
        }

        Self {
            closed: false,
            stations_released: false,
            next_order_id: 0,
            menu,
            pending: BTreeSet::new(),
            unassigned: VecDeque::new(),
            job_queues,
            slots: HashMap::new(),
        }
    }

    pub fn order_state(&self, order_id: OrderId) -> Option<OrderState> {
        self.slots.get(&order_id).map(|slot| slot.state)
    }

    pub fn set_order_state(&mut self, order_id: OrderId, state: OrderState) {
        if let Some(slot) = self.slots.get_mut(&order_id) {
            slot.state = state;
        }
    }

    pub fn pickup_signal(&self, order_id: OrderId) -> Option<Arc<Condvar>> {
        self.slots.get(&order_id).map(|slot| Arc::clone(&slot.pickup))
    }

    pub fn has_jobs(&self, product: &str) -> bool {
        self.job_queues
            .get(product)
            .is_some_and(|queue| !queue.is_empty())
    }
}

/// State shared by the orchestrator, order workers and station runners
pub(crate) struct Shared {
    pub state: Mutex<SystemState>,
    pub free_workers: Condvar,
    pub stations: HashMap<String, Arc<StationHandle>>,
    pub client_timeout: Duration,
}

impl Shared {
    pub fn new(stations: HashMap<String, SharedStation>, client_timeout: Duration) -> Self {
        let stations: HashMap<String, Arc<StationHandle>> = stations
            .into_iter()
            .map(|(product, station)| {
                let handle = StationHandle {
                    product: product.clone(),
                    station,
                    jobs_available: Condvar::new(),
                };
                (product, Arc::new(handle))
            })
            .collect();

        Self {
            state: Mutex::new(SystemState::new(stations.keys())),
            free_workers: Condvar::new(),
            stations,
            client_timeout,
        }
    }

    pub fn wake_all_stations(&self) {
        for handle in self.stations.values() {
            handle.jobs_available.notify_all();
        }
    }

    /// Give undelivered products back to the stations that made them
    ///
    /// Must be called without holding the state lock.
    pub fn return_products(&self, order_id: OrderId, products: Vec<(String, BoxedProduct)>) {
        for (product, item) in products {
            let Some(handle) = self.stations.get(&product) else {
                crate::log_station!(warn, "RETURN_SKIPPED", product: product, order_id: order_id);
                continue;
            };

            if let Err(e) = handle.station.accept_return(item) {
                crate::log_station!(warn, "RETURN_REJECTED",
                    product: product,
                    order_id: order_id,
                    error: e.to_string()
                );
            }
        }
    }
}
