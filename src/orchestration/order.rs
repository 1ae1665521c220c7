//! # Orders and Pagers
//!
//! An [`Order`] travels from the orchestrator to the worker that fulfills it. The
//! matching [`Pager`] stays with the client, who uses it to wait for the order and
//! then to collect it from the [`System`](crate::System).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use super::signal::{OneshotReceiver, OneshotSender, SignalStatus};
use crate::error::OrderError;
use crate::station::BoxedProduct;

/// Monotonically increasing order identity, allocated at submission
pub type OrderId = u64;

/// What the pager buzzes with once an order stops being in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderReadiness {
    /// Every product was made; the order waits for pickup
    Ready,
    /// A station failed; collecting yields a fulfillment failure
    Malfunction,
}

impl fmt::Display for OrderReadiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderReadiness::Ready => f.write_str("READY"),
            OrderReadiness::Malfunction => f.write_str("MACHINE MALFUNCTION"),
        }
    }
}

/// Final outcome stored in an order's result slot
pub(crate) type OrderOutcome = Result<Vec<BoxedProduct>, OrderError>;

/// An accepted order waiting for, or owned by, an order worker
#[derive(Debug)]
pub(crate) struct Order {
    pub id: OrderId,
    pub products: Vec<String>,
    pub ready: OneshotSender<OrderReadiness>,
    pub result: OneshotSender<OrderOutcome>,
}

/// Client-held handle for one order
#[derive(Debug)]
pub struct Pager {
    order_id: OrderId,
    buzzer: OneshotReceiver<OrderReadiness>,
    readiness: OnceLock<OrderReadiness>,
}

impl Pager {
    pub(crate) fn new(order_id: OrderId, buzzer: OneshotReceiver<OrderReadiness>) -> Self {
        Self {
            order_id,
            buzzer,
            readiness: OnceLock::new(),
        }
    }

    pub fn id(&self) -> OrderId {
        self.order_id
    }

    /// Non-blocking readiness check
    pub fn is_ready(&self) -> bool {
        self.readiness.get().is_some() || self.record(self.buzzer.try_take())
    }

    /// Block until the order is ready or has failed
    pub fn wait(&self) {
        if self.is_ready() {
            return;
        }
        // A dropped buzzer means the order can never complete
        let readiness = self.buzzer.wait().unwrap_or(OrderReadiness::Malfunction);
        let _ = self.readiness.set(readiness);
    }

    /// Block for at most `timeout`, returning whether the order is ready
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        self.is_ready() || self.record(self.buzzer.wait_timeout(timeout))
    }

    /// How the order resolved, once known
    pub fn readiness(&self) -> Option<OrderReadiness> {
        self.is_ready();
        self.readiness.get().copied()
    }

    fn record(&self, status: SignalStatus<OrderReadiness>) -> bool {
        let readiness = match status {
            SignalStatus::Resolved(readiness) => readiness,
            SignalStatus::Abandoned => OrderReadiness::Malfunction,
            SignalStatus::Pending => return false,
        };
        let _ = self.readiness.set(readiness);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::signal::oneshot;
    use std::thread;

    #[test]
    fn test_pager_not_ready_until_buzzed() {
        let (tx, rx) = oneshot();
        let pager = Pager::new(4, rx);

        assert_eq!(pager.id(), 4);
        assert!(!pager.is_ready());
        assert!(!pager.wait_timeout(Duration::from_millis(1)));
        assert_eq!(pager.readiness(), None);

        tx.resolve(OrderReadiness::Ready);
        assert!(pager.is_ready());
        // Stays ready after the buzz has been consumed
        assert!(pager.is_ready());
        assert_eq!(pager.readiness(), Some(OrderReadiness::Ready));
    }

    #[test]
    fn test_wait_blocks_until_buzzed() {
        let (tx, rx) = oneshot();
        let pager = Pager::new(0, rx);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            tx.resolve(OrderReadiness::Malfunction);
        });

        pager.wait();
        assert_eq!(pager.readiness(), Some(OrderReadiness::Malfunction));
        handle.join().unwrap();
    }

    #[test]
    fn test_wait_timeout_returns_early_when_ready() {
        let (tx, rx) = oneshot();
        let pager = Pager::new(0, rx);
        tx.resolve(OrderReadiness::Ready);

        let started = std::time::Instant::now();
        assert!(pager.wait_timeout(Duration::from_secs(10)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_abandoned_buzzer_reads_as_malfunction() {
        let (tx, rx) = oneshot::<OrderReadiness>();
        let pager = Pager::new(1, rx);
        drop(tx);

        pager.wait();
        assert!(pager.is_ready());
        assert_eq!(pager.readiness(), Some(OrderReadiness::Malfunction));
    }

    #[test]
    fn test_readiness_display() {
        assert_eq!(OrderReadiness::Ready.to_string(), "READY");
        assert_eq!(OrderReadiness::Malfunction.to_string(), "MACHINE MALFUNCTION");
    }
}
