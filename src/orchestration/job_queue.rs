//! # Station Job Queue
//!
//! Per-station priority queue of pending production jobs. Jobs for older orders
//! (lower order id) are served first regardless of when they were enqueued, so a
//! backlogged station cannot starve an older order behind newer ones. Jobs of the
//! same order are served in enqueue order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::order::OrderId;
use super::signal::OneshotSender;
use crate::error::StationError;
use crate::station::BoxedProduct;

/// Result delivered to the worker waiting on a job
pub type JobResult = Result<BoxedProduct, StationError>;

/// One product requested by one order, waiting for its station
#[derive(Debug)]
pub struct ProductionJob {
    order_id: OrderId,
    sequence: u64,
    slot: OneshotSender<JobResult>,
}

impl ProductionJob {
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Hand the result to the waiting worker. Returns false if nobody is waiting anymore.
    pub fn resolve(self, result: JobResult) -> bool {
        self.slot.resolve(result)
    }
}

impl PartialEq for ProductionJob {
    fn eq(&self, other: &Self) -> bool {
        self.order_id == other.order_id && self.sequence == other.sequence
    }
}

impl Eq for ProductionJob {}

impl PartialOrd for ProductionJob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProductionJob {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: lower order id first, then lower sequence (older) first
        other
            .order_id
            .cmp(&self.order_id)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Pending jobs for one station
#[derive(Debug, Default)]
pub struct JobQueue {
    jobs: BinaryHeap<ProductionJob>,
    next_sequence: u64,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, order_id: OrderId, slot: OneshotSender<JobResult>) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.jobs.push(ProductionJob {
            order_id,
            sequence,
            slot,
        });
    }

    /// Remove the job of the oldest order
    pub fn pop(&mut self) -> Option<ProductionJob> {
        self.jobs.pop()
    }

    /// Remove every pending job, oldest order first
    pub fn drain(&mut self) -> Vec<ProductionJob> {
        let mut drained = Vec::with_capacity(self.jobs.len());
        while let Some(job) = self.jobs.pop() {
            drained.push(job);
        }
        drained
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
