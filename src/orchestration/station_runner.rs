//! # Station Runner
//!
//! One thread per station. The runner sleeps until its job queue has work, serves the
//! oldest order's job, and hands the product to the waiting worker.
//!
//! A station failure is permanent: the failing job and every job queued behind it
//! resolve with the failure, the product leaves the menu, and any later job resolves
//! with a failure without touching the station again.

use std::sync::Arc;

use super::job_queue::ProductionJob;
use super::state::{Shared, StationHandle};
use crate::error::StationError;

pub(crate) struct StationRunner {
    handle: Arc<StationHandle>,
    shared: Arc<Shared>,
    out_of_service: bool,
}

impl StationRunner {
    pub fn new(handle: Arc<StationHandle>, shared: Arc<Shared>) -> Self {
        Self {
            handle,
            shared,
            out_of_service: false,
        }
    }

    pub fn run(mut self) {
        crate::log_station!(debug, "RUNNER_STARTED", product: self.handle.product);

        while let Some(job) = self.next_job() {
            if self.out_of_service {
                job.resolve(Err(StationError::failure(format!(
                    "station for '{}' is out of service",
                    self.handle.product
                ))));
                continue;
            }

            let order_id = job.order_id();
            match self.handle.station.produce() {
                Ok(product) => {
                    if !job.resolve(Ok(product)) {
                        crate::log_station!(warn, "DELIVERY_DROPPED", product: self.handle.product, order_id: order_id);
                    }
                }
                Err(error) => self.fail(job, error),
            }
        }

        crate::log_station!(debug, "RUNNER_STOPPED", product: self.handle.product);
    }

    /// Block until a job is queued; `None` once stations are released and the queue is drained
    fn next_job(&self) -> Option<ProductionJob> {
        let product = self.handle.product.as_str();
        let mut state = self.shared.state.lock();
        self.handle
            .jobs_available
            .wait_while(&mut state, |s| !s.stations_released && !s.has_jobs(product));
        state.job_queues.get_mut(product).and_then(|queue| queue.pop())
    }

    fn fail(&mut self, job: ProductionJob, error: StationError) {
        self.out_of_service = true;

        let swept = {
            let mut state = self.shared.state.lock();
            state.menu.remove(&self.handle.product);
            state
                .job_queues
                .get_mut(&self.handle.product)
                .map(|queue| queue.drain())
                .unwrap_or_default()
        };

        crate::log_station!(error, "FAILED",
            product: self.handle.product,
            order_id: job.order_id(),
            swept_jobs: swept.len(),
            error: error.to_string()
        );

        job.resolve(Err(error.clone()));
        for queued in swept {
            queued.resolve(Err(error.clone()));
        }
    }
}
