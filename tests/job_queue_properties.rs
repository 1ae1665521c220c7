//! Property-based tests for station job ordering

mod common;

use common::strategies::*;
use cyrk_core::orchestration::{oneshot, JobQueue, ProductionJob};
use proptest::prelude::*;

fn pop_all(queue: &mut JobQueue) -> Vec<ProductionJob> {
    std::iter::from_fn(|| queue.pop()).collect()
}

proptest! {
    /// Property: Jobs leave a station queue in ascending order-id order
    #[test]
    fn jobs_pop_oldest_order_first(ids in order_ids_strategy()) {
        let mut queue = JobQueue::new();
        let mut receivers = Vec::new();
        for id in &ids {
            let (slot, rx) = oneshot();
            queue.push(*id, slot);
            receivers.push(rx);
        }
        prop_assert_eq!(queue.len(), ids.len());

        let popped: Vec<u64> = pop_all(&mut queue).iter().map(ProductionJob::order_id).collect();
        let mut expected = ids.clone();
        expected.sort_unstable();
        prop_assert_eq!(popped, expected);
        prop_assert!(queue.is_empty());
    }

    /// Property: Draining yields the same order as popping one by one
    #[test]
    fn drain_matches_pop_order(ids in order_ids_strategy()) {
        let mut by_pop = JobQueue::new();
        let mut by_drain = JobQueue::new();
        for id in &ids {
            by_pop.push(*id, oneshot().0);
            by_drain.push(*id, oneshot().0);
        }

        let popped: Vec<u64> = pop_all(&mut by_pop).iter().map(ProductionJob::order_id).collect();
        let drained: Vec<u64> = by_drain.drain().iter().map(ProductionJob::order_id).collect();
        prop_assert_eq!(popped, drained);
        prop_assert!(by_drain.is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Property: A collected order holds exactly the requested products
    #[test]
    fn collected_orders_match_requests(order in order_strategy()) {
        let kitchen = common::Kitchen::new();
        let system = kitchen.system(2, common::PATIENCE);

        let pager = system.order(order.clone()).unwrap();
        pager.wait();
        let meal = system.collect_order(&pager).unwrap();
        prop_assert_eq!(meal.len(), order.len());

        let burgers = order.iter().filter(|p| p.as_str() == "burger").count();
        prop_assert_eq!(kitchen.burger.produced(), burgers);
        prop_assert!(system.pending_orders().is_empty());
    }
}
