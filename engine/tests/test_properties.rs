//! Property-based tests
//!
//! Exercises the queue ordering contract and the engine's bookkeeping
//! invariants across randomized inputs.

use dispatch_simulator_core_rs::{Engine, EngineConfig, Order, OrderQueue, OrderStatus};
use proptest::prelude::*;

proptest! {
    /// Popping always yields the remaining order with the maximum price;
    /// equal prices resolve toward the smaller creation sequence.
    #[test]
    fn prop_pop_respects_price_then_age(prices in prop::collection::vec(1i64..100_000, 1..50)) {
        let mut queue = OrderQueue::new();
        let mut expected: Vec<(i64, u64)> = Vec::new();

        for (i, &price) in prices.iter().enumerate() {
            let creation = (i + 1) as u64;
            queue.push(&Order::new(1, price, creation, 2));
            expected.push((price, creation));
        }

        // Highest price first, then oldest.
        expected.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        for (price, creation) in expected {
            let id = queue.pop_highest().unwrap();
            prop_assert_eq!(id, format!("ord_{:08}", creation), "price {}", price);
        }
        prop_assert!(queue.pop_highest().is_none());
    }

    /// For any seed, a default-config run preserves the order partition,
    /// truck exclusivity, and monotone tier/fleet invariants.
    #[test]
    fn prop_invariants_hold_for_any_seed(seed in any::<u64>()) {
        let config = EngineConfig { rng_seed: seed, ..Default::default() };
        let mut engine = Engine::new(config).unwrap();

        let mut last_fleet_size = 0;
        for _ in 0..30 {
            let snapshot = engine.step().unwrap();
            let state = engine.state();

            let queued = state
                .orders()
                .values()
                .filter(|o| o.status() == &OrderStatus::Queued)
                .count();
            let in_transit = state
                .orders()
                .values()
                .filter(|o| matches!(o.status(), OrderStatus::InTransit { .. }))
                .count();
            prop_assert_eq!(queued, state.queue_size());
            prop_assert_eq!(in_transit, state.deliveries().len());
            prop_assert_eq!(
                queued + in_transit + state.num_delivered(),
                state.orders().len()
            );

            let mut trucks_seen = std::collections::HashSet::new();
            for delivery in state.deliveries() {
                prop_assert!(trucks_seen.insert(delivery.truck_id));
            }

            prop_assert!(snapshot.fleet.len() >= last_fleet_size);
            prop_assert!(snapshot.fleet.len() <= 15);
            last_fleet_size = snapshot.fleet.len();
        }
    }

    /// Revenue accounting: reported revenue is exactly fleet earnings minus
    /// the tick's penalty total, for any seed.
    #[test]
    fn prop_revenue_matches_earnings_minus_penalty(seed in any::<u64>()) {
        let config = EngineConfig { rng_seed: seed, ..Default::default() };
        let mut engine = Engine::new(config).unwrap();

        for _ in 0..20 {
            let snapshot = engine.step().unwrap();
            let earnings: i64 = snapshot.fleet.iter().map(|t| t.total_earnings()).sum();
            prop_assert_eq!(snapshot.total_revenue, earnings - snapshot.penalty_total);
        }
    }
}
