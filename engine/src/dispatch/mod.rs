//! Dispatcher: greedy truck-to-order assignment
//!
//! One pass per tick over the fleet in roster order. Broken trucks and
//! trucks already carrying a delivery are skipped; every other truck pulls
//! the highest-priority order off the queue, at most one per truck per tick,
//! until the queue runs dry. Once assigned, a delivery runs to completion:
//! there is no cancellation or preemption, and aging applies only to orders
//! still in the queue.

use crate::models::delivery::Delivery;
use crate::models::fleet::Fleet;
use crate::models::order::Order;
use crate::orchestrator::SimulationError;
use crate::queue::OrderQueue;
use std::collections::HashMap;

/// A single truck-to-order pairing made by the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub truck_id: u32,
    pub order_id: String,
    pub remaining_ticks: usize,
}

/// Assign queued orders to idle, healthy trucks.
///
/// Mutates the queue (pops), the order arena (status transitions) and the
/// delivery list (inserts). Returns the assignments made this tick, in fleet
/// order. An attempt to pair a truck that already carries a delivery is an
/// internal-consistency error: the skip check above makes it unreachable,
/// and reaching it means state was corrupted somewhere upstream.
pub fn assign_idle_trucks(
    fleet: &Fleet,
    queue: &mut OrderQueue,
    orders: &mut HashMap<String, Order>,
    deliveries: &mut Vec<Delivery>,
) -> Result<Vec<Assignment>, SimulationError> {
    let mut assignments = Vec::new();

    for truck in fleet.trucks() {
        if truck.is_broken() {
            continue;
        }
        if deliveries.iter().any(|d| d.truck_id == truck.id()) {
            continue;
        }

        let order_id = match queue.pop_highest() {
            Some(id) => id,
            None => break,
        };

        let order = orders
            .get_mut(&order_id)
            .ok_or_else(|| SimulationError::OrderNotFound(order_id.clone()))?;
        if !order.is_queued() {
            return Err(SimulationError::InconsistentAssignment {
                truck_id: truck.id(),
            });
        }

        order.assign_to(truck.id());
        let remaining_ticks = order.distance();
        deliveries.push(Delivery::new(truck.id(), order_id.clone(), remaining_ticks));
        assignments.push(Assignment {
            truck_id: truck.id(),
            order_id,
            remaining_ticks,
        });
    }

    Ok(assignments)
}
