//! Order queue and aging policy
//!
//! A binary-heap priority container over queued orders plus the rule that
//! reclassifies and penalizes orders as they age.
//!
//! # Ordering
//!
//! The heap key encodes exactly two fields: higher `price` wins, ties break
//! toward the lower `creation_order` (older order first). Aging state
//! (`wait_ticks`, `penalized`) is deliberately NOT part of the key: orders
//! past the priority threshold are classified for reporting and penalty
//! accrual but their pop position never changes. The modeled dispatch
//! system behaves this way (its aging tiers never feed the comparator), so
//! the classification stays out of the ordering here as well.
//!
//! # Penalties
//!
//! Once a queued order's wait reaches the late threshold it accrues a
//! penalty of `penalty_rate * price` on that tick AND on every further tick
//! it stays queued (cumulative, not one-shot). The penalty reduces the
//! reported aggregate revenue only; truck earnings are never debited for it,
//! and the order is never evicted; it stays eligible for dispatch.

use crate::models::order::Order;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Heap key: (price desc, creation_order asc), order id as payload.
///
/// `BinaryHeap` is a max-heap, so `Ord` ranks by price first and by
/// *reversed* creation order second. The id participates last purely to keep
/// `Ord` consistent with `Eq`; creation orders are unique so it never
/// decides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct QueueKey {
    price: i64,
    creation_order: u64,
    order_id: String,
}

impl Ord for QueueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.price
            .cmp(&other.price)
            .then_with(|| other.creation_order.cmp(&self.creation_order))
            .then_with(|| other.order_id.cmp(&self.order_id))
    }
}

impl PartialOrd for QueueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of one tick of queue aging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgingOutcome {
    /// Sum of penalties accrued this tick (cents); reduces reported revenue
    pub penalty_total: i64,

    /// Orders that crossed the late threshold for the first time this tick,
    /// with the penalty each accrued
    pub newly_penalized: Vec<(String, i64)>,
}

/// Priority container over live (queued) orders
///
/// The queue holds keys only; the orders themselves live in the engine's
/// order arena. Push and pop are O(log n).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQueue {
    heap: BinaryHeap<QueueKey>,
}

impl OrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert an order's key; O(log n)
    pub fn push(&mut self, order: &Order) {
        self.heap.push(QueueKey {
            price: order.price(),
            creation_order: order.creation_order(),
            order_id: order.id().to_string(),
        });
    }

    /// Remove and return the id of the highest-priority order; O(log n).
    ///
    /// Highest priority means greatest price, ties broken by smallest
    /// creation order.
    pub fn pop_highest(&mut self) -> Option<String> {
        self.heap.pop().map(|key| key.order_id)
    }

    /// Ids of all queued orders, no ordering guarantee (for reporting/aging)
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.heap.iter().map(|key| key.order_id.as_str())
    }

    /// Age every queued order by one tick and apply the penalty rule.
    ///
    /// Increments `wait_ticks` for each queued order; any order at or past
    /// `late_threshold` accrues `round(penalty_rate * price)` into the tick's
    /// penalty total and is flagged `penalized`. Orders are never removed by
    /// this rule. Touches order state only; truck earnings are out of reach
    /// from this component.
    pub fn age_one_tick(
        &self,
        orders: &mut HashMap<String, Order>,
        late_threshold: usize,
        penalty_rate: f64,
    ) -> AgingOutcome {
        let mut outcome = AgingOutcome::default();

        for key in self.heap.iter() {
            let order = match orders.get_mut(&key.order_id) {
                Some(order) => order,
                None => continue,
            };

            let waited = order.record_wait();
            if waited >= late_threshold {
                let penalty = (penalty_rate * order.price() as f64).round() as i64;
                outcome.penalty_total += penalty;
                if !order.penalized() {
                    order.mark_penalized();
                    outcome.newly_penalized.push((order.id().to_string(), penalty));
                }
            }
        }

        outcome
    }

    /// How many orders to request from the source this tick.
    ///
    /// Replenishment only happens below `min_fill`, and the per-tick arrival
    /// allowance ramps with the tick index: `ceil(tick / 2 + 1)`.
    pub fn shortfall(&self, min_fill: usize, tick: usize) -> usize {
        if self.len() >= min_fill {
            return 0;
        }
        (min_fill - self.len()).min(arrival_allowance(tick))
    }
}

/// Per-tick arrival allowance: `ceil(tick / 2 + 1)`, tick index 1-based
fn arrival_allowance(tick: usize) -> usize {
    (tick + 3) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(price: i64, creation_order: u64) -> Order {
        Order::new(1, price, creation_order, 2)
    }

    #[test]
    fn test_pop_returns_highest_price() {
        let mut queue = OrderQueue::new();
        queue.push(&order(10_000, 1));
        queue.push(&order(30_000, 2));
        queue.push(&order(20_000, 3));

        assert_eq!(queue.pop_highest().as_deref(), Some("ord_00000002"));
        assert_eq!(queue.pop_highest().as_deref(), Some("ord_00000003"));
        assert_eq!(queue.pop_highest().as_deref(), Some("ord_00000001"));
        assert_eq!(queue.pop_highest(), None);
    }

    #[test]
    fn test_price_ties_break_toward_older_order() {
        let mut queue = OrderQueue::new();
        queue.push(&order(10_000, 5));
        queue.push(&order(10_000, 2));
        queue.push(&order(10_000, 9));

        assert_eq!(queue.pop_highest().as_deref(), Some("ord_00000002"));
        assert_eq!(queue.pop_highest().as_deref(), Some("ord_00000005"));
        assert_eq!(queue.pop_highest().as_deref(), Some("ord_00000009"));
    }

    #[test]
    fn test_aging_does_not_reorder_queue() {
        let mut queue = OrderQueue::new();
        let mut orders = HashMap::new();
        let old_cheap = order(10_000, 1);
        let new_dear = order(20_000, 2);
        queue.push(&old_cheap);
        queue.push(&new_dear);
        orders.insert(old_cheap.id().to_string(), old_cheap);
        orders.insert(new_dear.id().to_string(), new_dear);

        // Age the queue far past the late threshold; the cheap order is now
        // very late but still pops second.
        for _ in 0..10 {
            queue.age_one_tick(&mut orders, 5, 0.2);
        }
        assert!(orders.get("ord_00000001").unwrap().penalized());
        assert_eq!(queue.pop_highest().as_deref(), Some("ord_00000002"));
    }

    #[test]
    fn test_penalty_is_cumulative_per_tick() {
        let mut queue = OrderQueue::new();
        let mut orders = HashMap::new();
        let o = order(10_000, 1);
        queue.push(&o);
        orders.insert(o.id().to_string(), o);

        // Ticks 1-4: below the threshold, no penalty.
        for _ in 0..4 {
            let outcome = queue.age_one_tick(&mut orders, 5, 0.2);
            assert_eq!(outcome.penalty_total, 0);
        }

        // Tick 5: first penalty, order flagged.
        let outcome = queue.age_one_tick(&mut orders, 5, 0.2);
        assert_eq!(outcome.penalty_total, 2_000);
        assert_eq!(
            outcome.newly_penalized,
            vec![("ord_00000001".to_string(), 2_000)]
        );

        // Tick 6: penalty accrues again, but not "newly" penalized.
        let outcome = queue.age_one_tick(&mut orders, 5, 0.2);
        assert_eq!(outcome.penalty_total, 2_000);
        assert!(outcome.newly_penalized.is_empty());
        assert_eq!(orders.get("ord_00000001").unwrap().wait_ticks(), 6);
    }

    #[test]
    fn test_arrival_allowance_ramp() {
        assert_eq!(arrival_allowance(1), 2); // ceil(1/2 + 1)
        assert_eq!(arrival_allowance(2), 2);
        assert_eq!(arrival_allowance(3), 3);
        assert_eq!(arrival_allowance(4), 3);
        assert_eq!(arrival_allowance(10), 6);
    }

    #[test]
    fn test_shortfall_respects_min_fill_and_allowance() {
        let mut queue = OrderQueue::new();
        // Empty queue at tick 1: want min(10, 2) = 2.
        assert_eq!(queue.shortfall(10, 1), 2);
        // Empty queue at tick 20: want min(10, 11) = 10.
        assert_eq!(queue.shortfall(10, 20), 10);

        for seq in 1..=9 {
            queue.push(&order(10_000, seq));
        }
        // 9 queued at tick 20: want 1.
        assert_eq!(queue.shortfall(10, 20), 1);

        queue.push(&order(10_000, 10));
        assert_eq!(queue.shortfall(10, 20), 0);
    }
}
