pub mod batch;
pub mod error;
pub mod generator;
pub mod selector;
pub mod stats;

use selector::NumberWeight;

pub fn make_test_weights(pool_size: u8) -> Vec<NumberWeight> {
    (1..=pool_size)
        .map(|n| NumberWeight {
            number: n,
            frequency: 1,
            delayed: false,
        })
        .collect()
}
