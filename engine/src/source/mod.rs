//! Order source boundary
//!
//! The order generator is an external collaborator from the engine's point
//! of view: a black box that must hand back exactly `count` fresh orders on
//! demand. `RandomOrderSource` is the default implementation with uniform
//! price and distance draws; tests inject scripted sources through the same
//! trait.

use crate::models::order::Order;
use crate::rng::RngManager;

/// Black-box producer of new orders.
///
/// Implementations must return exactly `count` orders per call and assign
/// each a unique, monotonically increasing creation sequence number (the
/// engine verifies the count and treats a shortfall as a source error).
pub trait OrderSource {
    /// Produce `count` new orders, drawing any randomness from `rng`
    fn generate(&mut self, count: usize, rng: &mut RngManager) -> Vec<Order>;
}

/// Default order source: uniform price and distance, opaque customer ids
///
/// # Example
/// ```
/// use dispatch_simulator_core_rs::{OrderSource, RandomOrderSource, RngManager};
///
/// let mut source = RandomOrderSource::new((5_000, 100_000), (1, 4));
/// let mut rng = RngManager::new(42);
/// let orders = source.generate(3, &mut rng);
/// assert_eq!(orders.len(), 3);
/// assert!(orders.iter().all(|o| (5_000..=100_000).contains(&o.price())));
/// ```
#[derive(Debug, Clone)]
pub struct RandomOrderSource {
    /// Inclusive price range in cents
    price_range: (i64, i64),

    /// Inclusive distance range in ticks
    distance_range: (usize, usize),

    /// Next creation sequence number to hand out
    next_creation: u64,
}

impl RandomOrderSource {
    /// Ranges are validated by the engine config before construction.
    pub fn new(price_range: (i64, i64), distance_range: (usize, usize)) -> Self {
        Self {
            price_range,
            distance_range,
            next_creation: 1,
        }
    }
}

impl OrderSource for RandomOrderSource {
    fn generate(&mut self, count: usize, rng: &mut RngManager) -> Vec<Order> {
        let mut orders = Vec::with_capacity(count);
        for _ in 0..count {
            let price = rng.range_inclusive(self.price_range.0, self.price_range.1);
            let distance =
                rng.range_inclusive(self.distance_range.0 as i64, self.distance_range.1 as i64)
                    as usize;
            let customer_id = rng.range_inclusive(1, 100) as u32;

            let creation_order = self.next_creation;
            self.next_creation += 1;

            orders.push(Order::new(customer_id, price, creation_order, distance));
        }
        orders
    }
}
