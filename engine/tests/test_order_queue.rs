//! Tests for the order queue and aging policy

use dispatch_simulator_core_rs::{Order, OrderQueue};
use std::collections::HashMap;

fn order(price: i64, creation_order: u64) -> Order {
    Order::new(1, price, creation_order, 2)
}

#[test]
fn test_pop_sequence_is_price_descending() {
    let mut queue = OrderQueue::new();
    let prices = [7_000, 90_000, 12_000, 55_000, 31_000, 8_000];
    for (i, &price) in prices.iter().enumerate() {
        queue.push(&order(price, (i + 1) as u64));
    }

    let mut popped = Vec::new();
    while let Some(id) = queue.pop_highest() {
        popped.push(id);
    }
    assert_eq!(
        popped,
        vec![
            "ord_00000002", // 90_000
            "ord_00000004", // 55_000
            "ord_00000005", // 31_000
            "ord_00000003", // 12_000
            "ord_00000006", // 8_000
            "ord_00000001", // 7_000
        ]
    );
}

#[test]
fn test_equal_prices_pop_oldest_first() {
    let mut queue = OrderQueue::new();
    for seq in [30, 10, 20] {
        queue.push(&order(10_000, seq));
    }

    assert_eq!(queue.pop_highest().as_deref(), Some("ord_00000010"));
    assert_eq!(queue.pop_highest().as_deref(), Some("ord_00000020"));
    assert_eq!(queue.pop_highest().as_deref(), Some("ord_00000030"));
}

#[test]
fn test_late_orders_are_never_evicted() {
    let mut queue = OrderQueue::new();
    let mut orders = HashMap::new();
    let o = order(10_000, 1);
    queue.push(&o);
    orders.insert(o.id().to_string(), o);

    // Way past the late threshold: still queued, still poppable.
    for _ in 0..50 {
        queue.age_one_tick(&mut orders, 5, 0.2);
    }
    assert_eq!(queue.len(), 1);
    assert_eq!(orders.get("ord_00000001").unwrap().wait_ticks(), 50);
    assert!(orders.get("ord_00000001").unwrap().penalized());
    assert_eq!(queue.pop_highest().as_deref(), Some("ord_00000001"));
}

#[test]
fn test_penalty_accrues_every_late_tick() {
    let mut queue = OrderQueue::new();
    let mut orders = HashMap::new();
    let o = order(10_000, 1);
    queue.push(&o);
    orders.insert(o.id().to_string(), o);

    let mut total = 0;
    for _ in 0..8 {
        total += queue.age_one_tick(&mut orders, 5, 0.2).penalty_total;
    }
    // Late at waits 5, 6, 7, 8: four accruals of 20% of 10_000.
    assert_eq!(total, 4 * 2_000);
}

#[test]
fn test_aging_below_thresholds_has_no_effect() {
    let mut queue = OrderQueue::new();
    let mut orders = HashMap::new();
    let o = order(10_000, 1);
    queue.push(&o);
    orders.insert(o.id().to_string(), o);

    let outcome = queue.age_one_tick(&mut orders, 5, 0.2);
    assert_eq!(outcome.penalty_total, 0);
    assert!(outcome.newly_penalized.is_empty());
    assert!(!orders.get("ord_00000001").unwrap().penalized());
}

#[test]
fn test_ids_reports_all_queued_orders() {
    let mut queue = OrderQueue::new();
    for seq in 1..=5 {
        queue.push(&order(10_000 * seq as i64, seq));
    }

    let mut ids: Vec<&str> = queue.ids().collect();
    ids.sort_unstable();
    assert_eq!(
        ids,
        vec![
            "ord_00000001",
            "ord_00000002",
            "ord_00000003",
            "ord_00000004",
            "ord_00000005"
        ]
    );
}

#[test]
fn test_shortfall_zero_at_or_above_min_fill() {
    let mut queue = OrderQueue::new();
    for seq in 1..=10 {
        queue.push(&order(10_000, seq));
    }
    assert_eq!(queue.shortfall(10, 100), 0);
}

#[test]
fn test_shortfall_limited_by_early_tick_allowance() {
    let queue = OrderQueue::new();
    // Empty queue, min fill 10: the tick-1 allowance ceil(1/2 + 1) = 2 caps it.
    assert_eq!(queue.shortfall(10, 1), 2);
    assert_eq!(queue.shortfall(10, 2), 2);
    assert_eq!(queue.shortfall(10, 3), 3);
}
