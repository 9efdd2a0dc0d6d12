//! Engine State
//!
//! The single owned aggregate holding the order arena, the priority queue,
//! the fleet, and the active deliveries. All mutation goes through the
//! orchestrator's `step()`; there are no ambient globals.
//!
//! # Critical Invariants
//!
//! 1. **Order Partition**: every order in the arena is exactly one of
//!    queued / in one active delivery / delivered, never lost or duplicated
//! 2. **Truck Exclusivity**: a truck appears in at most one active delivery
//! 3. **Reference Validity**: every queue key and delivery references an
//!    order that exists in the arena; every delivery references a fleet truck

use crate::models::delivery::Delivery;
use crate::models::fleet::Fleet;
use crate::models::order::{Order, OrderStatus};
use crate::queue::OrderQueue;
use std::collections::HashMap;

/// Complete simulation state
///
/// Orders live in an arena indexed by id; the queue and the delivery list
/// hold id references only (arena + index pattern), so an order can never
/// dangle in two places at once.
#[derive(Debug, Clone)]
pub struct EngineState {
    /// The truck fleet, in dispatch order
    pub(crate) fleet: Fleet,

    /// All orders ever created, indexed by order id
    pub(crate) orders: HashMap<String, Order>,

    /// Priority queue over the queued subset of the arena
    pub(crate) queue: OrderQueue,

    /// Active deliveries: (truck_id, order_id, remaining_ticks)
    pub(crate) deliveries: Vec<Delivery>,
}

impl EngineState {
    /// Create fresh state with an initial fleet and no orders
    pub fn new(base_fleet_size: usize) -> Self {
        Self {
            fleet: Fleet::new(base_fleet_size),
            orders: HashMap::new(),
            queue: OrderQueue::new(),
            deliveries: Vec::new(),
        }
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn orders(&self) -> &HashMap<String, Order> {
        &self.orders
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn queue(&self) -> &OrderQueue {
        &self.queue
    }

    /// Number of orders currently waiting in the queue
    pub fn queue_size(&self) -> usize {
        self.queue.len()
    }

    /// Whether a truck currently carries an active delivery
    pub fn truck_is_busy(&self, truck_id: u32) -> bool {
        self.deliveries.iter().any(|d| d.truck_id == truck_id)
    }

    /// Add a newly generated order to the arena and the queue
    ///
    /// # Panics
    /// Panics if the order id already exists (duplicate order)
    pub fn admit_order(&mut self, order: Order) {
        let id = order.id().to_string();
        assert!(
            !self.orders.contains_key(&id),
            "Order id {} already exists",
            id
        );
        self.queue.push(&order);
        self.orders.insert(id, order);
    }

    /// Number of orders delivered so far
    pub fn num_delivered(&self) -> usize {
        self.orders
            .values()
            .filter(|o| matches!(o.status(), OrderStatus::Delivered { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = EngineState::new(10);
        assert_eq!(state.fleet().len(), 10);
        assert_eq!(state.queue_size(), 0);
        assert!(state.deliveries().is_empty());
    }

    #[test]
    fn test_admit_order_queues_it() {
        let mut state = EngineState::new(1);
        state.admit_order(Order::new(7, 10_000, 1, 2));

        assert_eq!(state.queue_size(), 1);
        assert!(state.orders().get("ord_00000001").unwrap().is_queued());
    }

    #[test]
    #[should_panic(expected = "already exists")]
    fn test_duplicate_order_panics() {
        let mut state = EngineState::new(1);
        state.admit_order(Order::new(7, 10_000, 1, 2));
        state.admit_order(Order::new(8, 20_000, 1, 3));
    }

    #[test]
    fn test_truck_is_busy() {
        let mut state = EngineState::new(2);
        assert!(!state.truck_is_busy(1));

        state
            .deliveries
            .push(Delivery::new(1, "ord_00000001".to_string(), 3));
        assert!(state.truck_is_busy(1));
        assert!(!state.truck_is_busy(2));
    }
}
