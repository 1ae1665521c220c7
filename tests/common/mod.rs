//! Shared fixtures for integration tests

#![allow(dead_code)]

pub mod strategies;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use cyrk_core::station::SharedStation;
use cyrk_core::test_utils::{ApplePie, Burger, Fries, SimulatedStation};
use cyrk_core::System;

/// Generous upper bound for waits that should finish almost immediately
pub const PATIENCE: Duration = Duration::from_secs(5);

/// Station handles kept by the test so counters can be inspected after the system owns them
pub struct Kitchen {
    pub burger: Arc<SimulatedStation>,
    pub fries: Arc<SimulatedStation>,
    pub pie: Arc<SimulatedStation>,
}

impl Kitchen {
    pub fn new() -> Self {
        Self::with(
            SimulatedStation::of::<Burger>(),
            SimulatedStation::of::<Fries>(),
            SimulatedStation::of::<ApplePie>(),
        )
    }

    pub fn with(burger: SimulatedStation, fries: SimulatedStation, pie: SimulatedStation) -> Self {
        Self {
            burger: Arc::new(burger),
            fries: Arc::new(fries),
            pie: Arc::new(pie),
        }
    }

    pub fn stations(&self) -> HashMap<String, SharedStation> {
        HashMap::from([
            ("burger".to_string(), Arc::clone(&self.burger) as SharedStation),
            ("fries".to_string(), Arc::clone(&self.fries) as SharedStation),
            ("pie".to_string(), Arc::clone(&self.pie) as SharedStation),
        ])
    }

    pub fn system(&self, workers: usize, client_timeout: Duration) -> System {
        System::new(self.stations(), workers, client_timeout).expect("system should start")
    }
}

/// A system with a single burger station
pub fn burger_only(workers: usize, client_timeout: Duration) -> (System, Arc<SimulatedStation>) {
    let burger = Arc::new(SimulatedStation::of::<Burger>());
    let stations = HashMap::from([("burger".to_string(), Arc::clone(&burger) as SharedStation)]);
    let system = System::new(stations, workers, client_timeout).expect("system should start");
    (system, burger)
}
