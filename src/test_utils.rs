//! # Test Utilities
//!
//! Simulated stations for unit tests, integration tests and benchmarks. A
//! [`SimulatedStation`] makes one product type after an optional delay, can be told
//! to break down on a given attempt, and counts what it produced and took back.

use parking_lot::Mutex;
use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use crate::error::StationError;
use crate::station::{BoxedProduct, Product, Station};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Burger;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplePie;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Fries;

/// Product stamped with the station's production counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub serial: usize,
}

/// In-process station with configurable latency and breakdown
pub struct SimulatedStation {
    type_name: &'static str,
    make: fn(usize) -> BoxedProduct,
    accepts: fn(&dyn Product) -> bool,
    delay: Duration,
    fail_on_attempt: Option<usize>,
    attempts: AtomicUsize,
    produced: AtomicUsize,
    returned: AtomicUsize,
    rejected: AtomicUsize,
    started: AtomicBool,
    stopped: AtomicBool,
    /// Serialises production so `delay` models a single busy machine
    busy: Mutex<()>,
}

impl SimulatedStation {
    /// Station making `P::default()` instantly
    pub fn of<P: Product + Default>() -> Self {
        Self::build(
            std::any::type_name::<P>(),
            |_| Box::new(P::default()) as BoxedProduct,
            |product: &dyn Product| product.is::<P>(),
        )
    }

    /// Station making [`Ticket`]s numbered in production order
    pub fn ticketed() -> Self {
        Self::build(
            "Ticket",
            |serial| Box::new(Ticket { serial }) as BoxedProduct,
            |product: &dyn Product| product.is::<Ticket>(),
        )
    }

    fn build(
        type_name: &'static str,
        make: fn(usize) -> BoxedProduct,
        accepts: fn(&dyn Product) -> bool,
    ) -> Self {
        Self {
            type_name,
            make,
            accepts,
            delay: Duration::ZERO,
            fail_on_attempt: None,
            attempts: AtomicUsize::new(0),
            produced: AtomicUsize::new(0),
            returned: AtomicUsize::new(0),
            rejected: AtomicUsize::new(0),
            started: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            busy: Mutex::new(()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Break down permanently on the given zero-based production attempt
    pub fn failing_on_attempt(mut self, attempt: usize) -> Self {
        self.fail_on_attempt = Some(attempt);
        self
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn produced(&self) -> usize {
        self.produced.load(Ordering::SeqCst)
    }

    pub fn returned(&self) -> usize {
        self.returned.load(Ordering::SeqCst)
    }

    pub fn rejected(&self) -> usize {
        self.rejected.load(Ordering::SeqCst)
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl Station for SimulatedStation {
    fn produce(&self) -> Result<BoxedProduct, StationError> {
        let _busy = self.busy.lock();
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        if self.fail_on_attempt.is_some_and(|fail_at| attempt >= fail_at) {
            return Err(StationError::failure(format!(
                "{} station broke down on attempt {attempt}",
                self.type_name
            )));
        }

        self.produced.fetch_add(1, Ordering::SeqCst);
        Ok((self.make)(attempt))
    }

    fn accept_return(&self, product: BoxedProduct) -> Result<(), StationError> {
        if !(self.accepts)(&*product) {
            self.rejected.fetch_add(1, Ordering::SeqCst);
            return Err(StationError::InvalidProduct {
                expected: self.type_name.to_string(),
            });
        }
        self.returned.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn start(&self) {
        self.started.store(true, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for SimulatedStation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedStation")
            .field("type_name", &self.type_name)
            .field("delay", &self.delay)
            .field("fail_on_attempt", &self.fail_on_attempt)
            .field("attempts", &self.attempts())
            .field("returned", &self.returned())
            .finish()
    }
}

/// True if `product` is a `T`; convenience for assertions on collected orders
pub fn is_product<T: Any>(product: &BoxedProduct) -> bool {
    product.is::<T>()
}
