//! Delivery: the transient association between one truck and one order.
//!
//! Deliveries are stored by id reference (arena + index pattern) in a
//! collection separate from both the fleet and the order arena, so a truck or
//! order can never end up in two deliveries at once without it being visible.

use serde::{Deserialize, Serialize};

/// An active delivery pairing exactly one truck with exactly one order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    /// Carrying truck id
    pub truck_id: u32,

    /// Order being delivered
    pub order_id: String,

    /// Ticks left until completion; initialized to the order's distance
    pub remaining_ticks: usize,
}

impl Delivery {
    pub fn new(truck_id: u32, order_id: String, remaining_ticks: usize) -> Self {
        Self {
            truck_id,
            order_id,
            remaining_ticks,
        }
    }

    /// Advance the delivery by one tick; returns true when it completes
    pub fn advance(&mut self) -> bool {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        self.remaining_ticks == 0
    }
}
