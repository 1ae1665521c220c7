use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use cyrk_core::orchestration::{oneshot, JobQueue};
use cyrk_core::station::SharedStation;
use cyrk_core::test_utils::{ApplePie, Burger, Fries, SimulatedStation};
use cyrk_core::System;

fn kitchen() -> HashMap<String, SharedStation> {
    HashMap::from([
        ("burger".to_string(), Arc::new(SimulatedStation::of::<Burger>()) as SharedStation),
        ("fries".to_string(), Arc::new(SimulatedStation::of::<Fries>()) as SharedStation),
        ("pie".to_string(), Arc::new(SimulatedStation::of::<ApplePie>()) as SharedStation),
    ])
}

fn benchmark_order_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_round_trip");
    for workers in [1usize, 4] {
        let system = System::new(kitchen(), workers, Duration::from_secs(1))
            .expect("benchmark system should start");
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, _| {
            b.iter(|| {
                let pager = system
                    .order(["burger", "fries", "pie"])
                    .expect("menu is intact");
                pager.wait();
                black_box(system.collect_order(&pager).expect("order collected"))
            })
        });
        system.shutdown();
    }
    group.finish();
}

fn benchmark_job_queue(c: &mut Criterion) {
    c.bench_function("job_queue_push_pop_1k", |b| {
        b.iter(|| {
            let mut queue = JobQueue::new();
            for id in (0..1000u64).rev() {
                queue.push(id, oneshot().0);
            }
            while let Some(job) = queue.pop() {
                black_box(job.order_id());
            }
        })
    });
}

criterion_group!(benches, benchmark_order_round_trip, benchmark_job_queue);
criterion_main!(benches);
