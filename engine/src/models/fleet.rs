//! Fleet: the ordered, append-only collection of trucks.
//!
//! The fleet owns every truck for the lifetime of the simulation. Growth is
//! incremental and earnings-triggered: at most one truck is purchased per
//! tick, new ids continue from the current maximum, and the roster never
//! shrinks. Growth is capped at a configured maximum size.

use crate::models::truck::Truck;
use serde::{Deserialize, Serialize};

/// Ordered collection of trucks with unique ids and append-only growth
///
/// # Example
/// ```
/// use dispatch_simulator_core_rs::Fleet;
///
/// let fleet = Fleet::new(10);
/// assert_eq!(fleet.len(), 10);
/// assert_eq!(fleet.trucks()[0].id(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fleet {
    trucks: Vec<Truck>,
}

impl Fleet {
    /// Create the initial fleet with trucks numbered 1..=size
    pub fn new(size: usize) -> Self {
        let trucks = (1..=size as u32).map(Truck::new).collect();
        Self { trucks }
    }

    pub fn len(&self) -> usize {
        self.trucks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trucks.is_empty()
    }

    /// Trucks in fleet order (dispatch iterates in this order)
    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }

    pub fn trucks_mut(&mut self) -> &mut [Truck] {
        &mut self.trucks
    }

    /// Get a truck by id
    pub fn get(&self, id: u32) -> Option<&Truck> {
        self.trucks.iter().find(|t| t.id() == id)
    }

    /// Get a mutable truck by id
    pub fn get_mut(&mut self, id: u32) -> Option<&mut Truck> {
        self.trucks.iter_mut().find(|t| t.id() == id)
    }

    /// Sum of earnings across the whole fleet (may be negative)
    pub fn total_earnings(&self) -> i64 {
        self.trucks.iter().map(Truck::total_earnings).sum()
    }

    /// The id the next purchased truck would receive: max(existing) + 1
    pub fn next_id(&self) -> u32 {
        self.trucks.iter().map(Truck::id).max().unwrap_or(0) + 1
    }

    /// Evaluate the fleet-growth trigger for this tick.
    ///
    /// `target = min(base_size + floor(total_earnings / earnings_unit), max_size)`
    /// with Euclidean (floor) division, so negative fleet earnings can pull
    /// the target below `base_size`. The fleet never shrinks: when the target
    /// is at or below the current size nothing happens. When it is above,
    /// exactly one truck is appended (bounded, incremental growth) and its id
    /// is returned.
    pub fn maybe_grow(&mut self, base_size: usize, max_size: usize, earnings_unit: i64) -> Option<u32> {
        let target = (base_size as i64 + self.total_earnings().div_euclid(earnings_unit))
            .min(max_size as i64);

        if (self.trucks.len() as i64) < target {
            let id = self.next_id();
            self.trucks.push(Truck::new(id));
            Some(id)
        } else {
            None
        }
    }
}
