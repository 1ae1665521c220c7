//! Proptest strategies for order and job generation

use proptest::prelude::*;

pub const PRODUCTS: [&str; 3] = ["burger", "fries", "pie"];

/// Order ids in arbitrary arrival order, duplicates allowed
pub fn order_ids_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..64, 0..40)
}

/// A non-empty order built from known products, repeats allowed
pub fn order_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(PRODUCTS.to_vec()), 1..5)
        .prop_map(|products| products.into_iter().map(String::from).collect())
}
