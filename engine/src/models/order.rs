//! Order model
//!
//! Represents a customer delivery order. Each order has:
//! - A price (i64 cents) driving both queue priority and truck earnings
//! - A creation sequence number used only as a priority tie-break
//! - A distance: the number of ticks its delivery takes
//! - A wait counter and penalty flag maintained by the aging policy
//! - Status (Queued, InTransit, Delivered)
//!
//! CRITICAL: All money values are i64 (cents)

use serde::{Deserialize, Serialize};

/// Order status
///
/// Tracks the lifecycle of an order through the system. An order is created
/// queued, leaves the queue exactly once when the dispatcher assigns it to a
/// truck, and is never expired or evicted while waiting. Aging past the late
/// threshold penalizes a queued order but does not remove it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Waiting in the order queue for dispatch
    Queued,

    /// Assigned to a truck, delivery in flight
    InTransit {
        /// The carrying truck's id
        truck_id: u32,
    },

    /// Delivery completed
    Delivered {
        /// Tick when the delivery completed
        tick: usize,
    },
}

/// Represents a customer delivery order
///
/// # Example
/// ```
/// use dispatch_simulator_core_rs::Order;
///
/// let order = Order::new(42, 10_000, 7, 3); // $100.00, seq 7, 3 ticks out
/// assert_eq!(order.price(), 10_000);
/// assert_eq!(order.wait_ticks(), 0);
/// assert!(!order.penalized());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier, derived from the creation sequence
    id: String,

    /// Opaque customer identifier (informational only)
    customer_id: u32,

    /// Order price (i64 cents), strictly positive
    price: i64,

    /// Monotonically increasing creation sequence number.
    /// Stands in for a wall-clock timestamp; used only as a priority
    /// tie-break (older orders win on equal price).
    creation_order: u64,

    /// Delivery duration in ticks, strictly positive
    distance: usize,

    /// Ticks spent waiting in the queue so far
    wait_ticks: usize,

    /// Set once the wait crosses the late threshold; never cleared
    penalized: bool,

    /// Current status
    status: OrderStatus,
}

impl Order {
    /// Create a new queued order
    ///
    /// The order id is derived from `creation_order`, which the order source
    /// guarantees to be unique and monotonically increasing.
    ///
    /// # Panics
    /// Panics if price <= 0 or distance == 0
    pub fn new(customer_id: u32, price: i64, creation_order: u64, distance: usize) -> Self {
        assert!(price > 0, "price must be positive");
        assert!(distance > 0, "distance must be positive");

        Self {
            id: format!("ord_{:08}", creation_order),
            customer_id,
            price,
            creation_order,
            distance,
            wait_ticks: 0,
            penalized: false,
            status: OrderStatus::Queued,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_id(&self) -> u32 {
        self.customer_id
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn creation_order(&self) -> u64 {
        self.creation_order
    }

    pub fn distance(&self) -> usize {
        self.distance
    }

    pub fn wait_ticks(&self) -> usize {
        self.wait_ticks
    }

    pub fn penalized(&self) -> bool {
        self.penalized
    }

    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    /// Whether the order is still waiting in the queue
    pub fn is_queued(&self) -> bool {
        self.status == OrderStatus::Queued
    }

    /// Record one tick of queue wait; returns the updated counter
    pub fn record_wait(&mut self) -> usize {
        self.wait_ticks += 1;
        self.wait_ticks
    }

    /// Mark the order as penalized (idempotent, never cleared)
    pub fn mark_penalized(&mut self) {
        self.penalized = true;
    }

    /// Transition Queued -> InTransit on dispatcher assignment
    pub fn assign_to(&mut self, truck_id: u32) {
        debug_assert!(self.is_queued(), "only queued orders can be assigned");
        self.status = OrderStatus::InTransit { truck_id };
    }

    /// Transition InTransit -> Delivered when the delivery completes
    pub fn mark_delivered(&mut self, tick: usize) {
        self.status = OrderStatus::Delivered { tick };
    }
}
