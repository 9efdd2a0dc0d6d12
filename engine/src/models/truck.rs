//! Truck model
//!
//! Represents a delivery truck in the fleet. Each truck has:
//! - A running earnings total (i64 cents), charged gas every tick and
//!   credited the full order price on delivery completion
//! - A tier derived from earnings, used only for reporting; it is recomputed
//!   on every credit but only ever moves upward
//! - Breakdown state with a repair countdown
//!
//! A truck can be broken and mid-delivery at the same time: breakdown does
//! not pause or cancel an in-flight delivery, it only blocks new assignments.
//!
//! CRITICAL: All money values are i64 (cents)

use serde::{Deserialize, Serialize};

/// Represents a delivery truck
///
/// # Example
/// ```
/// use dispatch_simulator_core_rs::Truck;
///
/// let mut truck = Truck::new(1);
/// truck.charge_gas(2_000);
/// assert_eq!(truck.total_earnings(), -2_000); // negative is legitimate
///
/// truck.credit_delivery(60_000, 50_000, 5);
/// assert_eq!(truck.total_earnings(), 58_000);
/// assert_eq!(truck.tier(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    /// Unique truck identifier, assigned at creation
    id: u32,

    /// Signed running earnings total (i64 cents).
    /// Gas may drive this negative; no floor is enforced.
    total_earnings: i64,

    /// Earnings-derived status level. Monotonically non-decreasing even when
    /// earnings fall back below a tier boundary.
    tier: i64,

    /// Whether the truck is currently broken down
    is_broken: bool,

    /// Ticks left before repair completes; meaningful only while broken
    repair_remaining: usize,
}

impl Truck {
    /// Create a new healthy truck with zero earnings
    pub fn new(id: u32) -> Self {
        Self {
            id,
            total_earnings: 0,
            tier: 0,
            is_broken: false,
            repair_remaining: 0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn total_earnings(&self) -> i64 {
        self.total_earnings
    }

    pub fn tier(&self) -> i64 {
        self.tier
    }

    pub fn is_broken(&self) -> bool {
        self.is_broken
    }

    pub fn repair_remaining(&self) -> usize {
        self.repair_remaining
    }

    /// Unconditionally deduct the per-tick gas cost.
    ///
    /// Applies regardless of broken/idle/delivering status.
    pub fn charge_gas(&mut self, cost: i64) {
        self.total_earnings -= cost;
    }

    /// Credit a completed delivery and recompute the tier.
    ///
    /// The tier candidate is `floor(earnings / earnings_unit) * tier_step`
    /// (Euclidean division, so negative earnings floor toward -inf); the
    /// stored tier only moves upward.
    pub fn credit_delivery(&mut self, price: i64, earnings_unit: i64, tier_step: i64) {
        self.total_earnings += price;
        let candidate = self.total_earnings.div_euclid(earnings_unit) * tier_step;
        if candidate > self.tier {
            self.tier = candidate;
        }
    }

    /// Put the truck into the broken state with a repair countdown
    pub fn break_down(&mut self, repair_ticks: usize) {
        self.is_broken = true;
        self.repair_remaining = repair_ticks;
    }

    /// Advance the repair countdown by one tick.
    ///
    /// Returns true exactly when the repair completes on this call.
    pub fn tick_repair(&mut self) -> bool {
        if !self.is_broken {
            return false;
        }
        self.repair_remaining = self.repair_remaining.saturating_sub(1);
        if self.repair_remaining == 0 {
            self.is_broken = false;
            return true;
        }
        false
    }
}
