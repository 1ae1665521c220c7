//! # One-Shot Signals
//!
//! Single-producer, single-consumer signals used for job results, order readiness
//! and order results. Built on a bounded crossbeam channel of capacity one, so a send
//! never blocks and a receiver observes either the value or the sender being dropped.

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Outcome of polling a signal without consuming a resolved value
#[derive(Debug, PartialEq, Eq)]
pub enum SignalStatus<T> {
    Resolved(T),
    Pending,
    /// The sender was dropped without resolving
    Abandoned,
}

/// Writing half; consumed by `resolve`
#[derive(Debug)]
pub struct OneshotSender<T> {
    inner: Sender<T>,
}

/// Reading half
#[derive(Debug)]
pub struct OneshotReceiver<T> {
    inner: Receiver<T>,
}

pub fn oneshot<T>() -> (OneshotSender<T>, OneshotReceiver<T>) {
    let (tx, rx) = channel::bounded(1);
    (OneshotSender { inner: tx }, OneshotReceiver { inner: rx })
}

impl<T> OneshotSender<T> {
    /// Resolve the signal. Returns false if the receiver is already gone.
    pub fn resolve(self, value: T) -> bool {
        self.inner.send(value).is_ok()
    }
}

impl<T> OneshotReceiver<T> {
    /// Block until resolved. `None` means the sender was dropped.
    pub fn wait(&self) -> Option<T> {
        self.inner.recv().ok()
    }

    /// Block for at most `timeout`
    pub fn wait_timeout(&self, timeout: Duration) -> SignalStatus<T> {
        match self.inner.recv_timeout(timeout) {
            Ok(value) => SignalStatus::Resolved(value),
            Err(RecvTimeoutError::Timeout) => SignalStatus::Pending,
            Err(RecvTimeoutError::Disconnected) => SignalStatus::Abandoned,
        }
    }

    pub fn try_take(&self) -> SignalStatus<T> {
        match self.inner.try_recv() {
            Ok(value) => SignalStatus::Resolved(value),
            Err(TryRecvError::Empty) => SignalStatus::Pending,
            Err(TryRecvError::Disconnected) => SignalStatus::Abandoned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_resolve_then_wait() {
        let (tx, rx) = oneshot();
        assert!(tx.resolve(42));
        assert_eq!(rx.wait(), Some(42));
    }

    #[test]
    fn test_dropped_sender_is_abandoned() {
        let (tx, rx) = oneshot::<u8>();
        assert_eq!(rx.try_take(), SignalStatus::Pending);
        drop(tx);
        assert_eq!(rx.try_take(), SignalStatus::Abandoned);
        assert_eq!(rx.wait(), None);
    }

    #[test]
    fn test_resolve_after_receiver_dropped() {
        let (tx, rx) = oneshot();
        drop(rx);
        assert!(!tx.resolve("late"));
    }

    #[test]
    fn test_wait_timeout_across_threads() {
        let (tx, rx) = oneshot();
        assert_eq!(rx.wait_timeout(Duration::from_millis(5)), SignalStatus::Pending);

        let handle = thread::spawn(move || {
            tx.resolve(String::from("ready"));
        });
        assert_eq!(
            rx.wait_timeout(Duration::from_secs(5)),
            SignalStatus::Resolved(String::from("ready"))
        );
        handle.join().unwrap();
    }
}
