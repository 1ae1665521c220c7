//! # Order Worker
//!
//! One thread per worker slot. A worker claims the oldest unassigned order, fans it
//! out into one production job per product, waits for every job, then either fails
//! the order or holds it for pickup until the client collects or the timeout elapses.
//!
//! ```text
//! Claimed -> Dispatched -> Ready -> Collected
//!                      |         \-> Expired
//!                      \-> Failed
//! ```
//!
//! After shutdown begins, workers keep claiming until the unassigned queue is empty,
//! so every accepted order reaches exactly one final outcome.

use std::sync::Arc;

use super::job_queue::JobResult;
use super::order::{Order, OrderId, OrderOutcome, OrderReadiness};
use super::report::WorkerReport;
use super::signal::{oneshot, OneshotReceiver, OneshotSender};
use super::state::Shared;
use crate::constants::OrderState;
use crate::error::{OrderError, StationError};
use crate::station::BoxedProduct;

pub(crate) struct OrderWorker {
    index: usize,
    shared: Arc<Shared>,
    report: WorkerReport,
}

impl OrderWorker {
    pub fn new(index: usize, shared: Arc<Shared>) -> Self {
        Self {
            index,
            shared,
            report: WorkerReport::default(),
        }
    }

    pub fn run(mut self) -> WorkerReport {
        crate::log_worker!(debug, "STARTED", worker: self.index);

        while let Some(order) = self.claim() {
            self.fulfill(order);
        }

        crate::log_worker!(debug, "STOPPED", worker: self.index,
            orders_handled: self.report.orders_handled()
        );
        self.report
    }

    /// Wait for the oldest unassigned order; `None` once closed with nothing left to claim
    fn claim(&self) -> Option<Order> {
        let mut state = self.shared.state.lock();
        self.shared
            .free_workers
            .wait_while(&mut state, |s| !s.closed && s.unassigned.is_empty());
        state.unassigned.pop_front()
    }

    fn fulfill(&mut self, order: Order) {
        let Order {
            id,
            products,
            ready,
            result,
        } = order;

        crate::log_worker!(debug, "CLAIMED", worker: self.index, order_id: id, products: products);

        let jobs = self.dispatch(id, &products);
        let (made, failed) = self.await_jobs(id, &products, jobs);

        if failed == 0 {
            self.await_pickup(id, products, made, ready, result);
        } else {
            self.fail_order(id, products, made, ready, result);
        }
    }

    /// Queue one job per product on its station and wake the runners
    fn dispatch(&self, order_id: OrderId, products: &[String]) -> Vec<OneshotReceiver<JobResult>> {
        let mut state = self.shared.state.lock();
        state.set_order_state(order_id, OrderState::Dispatched);

        let jobs: Vec<_> = products
            .iter()
            .map(|product| {
                let (slot, job) = oneshot();
                match (
                    state.job_queues.get_mut(product),
                    self.shared.stations.get(product),
                ) {
                    (Some(queue), Some(handle)) => {
                        queue.push(order_id, slot);
                        handle.jobs_available.notify_one();
                    }
                    _ => {
                        slot.resolve(Err(StationError::failure(format!(
                            "no station makes '{product}'"
                        ))));
                    }
                }
                job
            })
            .collect();

        crate::log_order!(debug, "DISPATCHED", order_id: order_id, jobs: jobs.len());
        jobs
    }

    /// Wait for every job, even after one has failed, so none is left dangling
    fn await_jobs(
        &mut self,
        order_id: OrderId,
        products: &[String],
        jobs: Vec<OneshotReceiver<JobResult>>,
    ) -> (Vec<(String, BoxedProduct)>, usize) {
        let mut made = Vec::with_capacity(products.len());
        let mut failed = 0;

        for (product, job) in products.iter().zip(jobs) {
            match job.wait() {
                Some(Ok(item)) => made.push((product.clone(), item)),
                Some(Err(error)) => {
                    crate::log_worker!(warn, "PRODUCT_FAILED", worker: self.index,
                        order_id: order_id,
                        product: product,
                        error: error.to_string()
                    );
                    self.report.failed_products.push(product.clone());
                    failed += 1;
                }
                None => {
                    crate::log_worker!(error, "PRODUCT_ABANDONED", worker: self.index,
                        order_id: order_id,
                        product: product
                    );
                    self.report.failed_products.push(product.clone());
                    failed += 1;
                }
            }
        }

        (made, failed)
    }

    fn fail_order(
        &mut self,
        order_id: OrderId,
        products: Vec<String>,
        made: Vec<(String, BoxedProduct)>,
        ready: OneshotSender<OrderReadiness>,
        result: OneshotSender<OrderOutcome>,
    ) {
        {
            let mut state = self.shared.state.lock();
            state.set_order_state(order_id, OrderState::Failed);
            state.pending.remove(&order_id);
            ready.resolve(OrderReadiness::Malfunction);
        }

        crate::log_order!(warn, "FAILED", order_id: order_id,
            worker: self.index,
            returned: made.len()
        );

        self.report.failed_orders.push(products);
        self.shared.return_products(order_id, made);
        result.resolve(Err(OrderError::FulfillmentFailure { order_id }));
    }

    fn await_pickup(
        &mut self,
        order_id: OrderId,
        products: Vec<String>,
        made: Vec<(String, BoxedProduct)>,
        ready: OneshotSender<OrderReadiness>,
        result: OneshotSender<OrderOutcome>,
    ) {
        let picked_up = {
            let mut state = self.shared.state.lock();
            state.set_order_state(order_id, OrderState::Ready);
            ready.resolve(OrderReadiness::Ready);

            crate::log_order!(debug, "READY", order_id: order_id, worker: self.index);

            let pickup = state.pickup_signal(order_id);
            if let Some(pickup) = pickup {
                pickup.wait_while_for(
                    &mut state,
                    |s| s.order_state(order_id) == Some(OrderState::Ready),
                    self.shared.client_timeout,
                );
            }

            // Whoever moved the order out of Ready first decides its outcome
            let picked_up = state.order_state(order_id) == Some(OrderState::PickedUp);
            if picked_up {
                state.slots.remove(&order_id);
            } else {
                state.set_order_state(order_id, OrderState::Expired);
            }
            state.pending.remove(&order_id);
            picked_up
        };

        if picked_up {
            crate::log_order!(info, "COLLECTED", order_id: order_id, worker: self.index);
            self.report.collected_orders.push(products);
            result.resolve(Ok(made.into_iter().map(|(_, item)| item).collect()));
        } else {
            crate::log_order!(info, "EXPIRED", order_id: order_id,
                worker: self.index,
                returned: made.len()
            );
            self.report.abandoned_orders.push(products);
            self.shared.return_products(order_id, made);
            result.resolve(Err(OrderError::OrderExpired { order_id }));
        }
    }
}
