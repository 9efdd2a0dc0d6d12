//! Engine - main simulation loop
//!
//! Integrates all components into the fixed per-tick sequence:
//!
//! ```text
//! For each tick t:
//! 1. Advance active deliveries; credit trucks on completion
//! 2. Charge gas to every truck (broken and busy trucks included)
//! 3. Resolve breakdowns / repair countdowns
//! 4. Age queued orders; accrue late penalties
//! 5. Replenish the queue from the order source
//! 6. Dispatch idle, healthy trucks to queued orders
//! 7. Evaluate fleet growth
//! 8. Emit a read-only snapshot
//! ```
//!
//! The engine is single-threaded and synchronous: `step()` is the only entry
//! point, runs every sub-step to completion, and performs no I/O. The
//! external driver decides the cadence; ticks are logical time. A host that
//! wraps the engine in threads must treat the whole `step()` call as a
//! critical section, since the queue, fleet, and per-tick aggregates mutate
//! non-atomically across sub-steps.
//!
//! # Determinism
//!
//! All randomness flows through one seeded xorshift64* `RngManager`:
//! breakdown rolls, repair durations, and order generation. Same seed + same
//! config = identical run.
//!
//! # Example
//!
//! ```rust
//! use dispatch_simulator_core_rs::{Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::default()).unwrap();
//! let snapshot = engine.step().unwrap();
//! assert_eq!(snapshot.tick, 1);
//! assert_eq!(snapshot.num_arrivals, 2); // ceil(1/2 + 1) on an empty queue
//! ```

use crate::core::time::TimeManager;
use crate::dispatch;
use crate::models::event::{Event, EventLog};
use crate::models::order::Order;
use crate::models::state::EngineState;
use crate::models::truck::Truck;
use crate::models::delivery::Delivery;
use crate::rng::RngManager;
use crate::source::{OrderSource, RandomOrderSource};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration
// ============================================================================

/// Complete engine configuration
///
/// All money values in cents. Defaults mirror the modeled dispatch system:
/// orders turn late after 5 queued ticks and then forfeit 20% of their price
/// per tick in reported revenue, trucks have a 5% per-tick breakdown chance
/// with 3-10 tick repairs, gas costs $20 per truck per tick, and the fleet
/// grows from 10 trucks toward a hard cap of 15 as each $500 of cumulative
/// earnings raises the target by one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// RNG seed for deterministic simulation
    pub rng_seed: u64,

    /// Queued ticks at which an order starts accruing penalties
    pub late_threshold: usize,

    /// Queued ticks at which an order is classified "priority-aged".
    /// Reporting-only: it never alters pop order (preserved behavior of the
    /// modeled system, where the aging tiers do not feed the comparator).
    pub priority_threshold: usize,

    /// Fraction of the order price accrued as penalty per late tick
    pub penalty_rate: f64,

    /// Per-tick breakdown probability for a healthy truck
    pub breakdown_p: f64,

    /// Inclusive range of repair durations in ticks
    pub repair_ticks: (usize, usize),

    /// Per-tick gas cost charged to every truck (cents)
    pub gas_cost: i64,

    /// Initial fleet size
    pub base_fleet_size: usize,

    /// Hard cap on fleet size
    pub max_fleet_size: usize,

    /// Tier points granted per earnings unit
    pub tier_step: i64,

    /// Earnings per tier boundary (cents)
    pub tier_earnings_unit: i64,

    /// Cumulative fleet earnings per extra target truck (cents)
    pub growth_earnings_unit: i64,

    /// Queue level below which the source is asked for more orders
    pub queue_min_fill: usize,

    /// Inclusive order price range for the default source (cents)
    pub price_range: (i64, i64),

    /// Inclusive order distance range for the default source (ticks)
    pub distance_range: (usize, usize),
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rng_seed: 12345,
            late_threshold: 5,
            priority_threshold: 4,
            penalty_rate: 0.2,
            breakdown_p: 0.05,
            repair_ticks: (3, 10),
            gas_cost: 2_000,
            base_fleet_size: 10,
            max_fleet_size: 15,
            tier_step: 5,
            tier_earnings_unit: 50_000,
            growth_earnings_unit: 50_000,
            queue_min_fill: 10,
            price_range: (5_000, 100_000),
            distance_range: (1, 4),
        }
    }
}

/// Configuration validation error (fail-fast at construction)
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("price range ({min}, {max}) must be positive with min <= max")]
    InvalidPriceRange { min: i64, max: i64 },

    #[error("distance range ({min}, {max}) must be at least 1 with min <= max")]
    InvalidDistanceRange { min: usize, max: usize },

    #[error("penalty rate {0} must be within [0, 1]")]
    InvalidPenaltyRate(f64),

    #[error("breakdown probability {0} must be within [0, 1]")]
    InvalidBreakdownProbability(f64),

    #[error("repair range ({min}, {max}) must be at least 1 tick with min <= max")]
    InvalidRepairRange { min: usize, max: usize },

    #[error("fleet bounds (base {base}, max {max}) require 1 <= base <= max")]
    InvalidFleetBounds { base: usize, max: usize },

    #[error("gas cost {0} must not be negative")]
    NegativeGasCost(i64),

    #[error("queue minimum fill must be at least 1")]
    InvalidQueueMinFill,

    #[error("earnings unit {0} must be positive")]
    InvalidEarningsUnit(i64),

    #[error("tier step {0} must not be negative")]
    NegativeTierStep(i64),
}

impl EngineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (price_min, price_max) = self.price_range;
        if price_min <= 0 || price_min > price_max {
            return Err(ConfigError::InvalidPriceRange {
                min: price_min,
                max: price_max,
            });
        }

        let (dist_min, dist_max) = self.distance_range;
        if dist_min == 0 || dist_min > dist_max {
            return Err(ConfigError::InvalidDistanceRange {
                min: dist_min,
                max: dist_max,
            });
        }

        if !(0.0..=1.0).contains(&self.penalty_rate) {
            return Err(ConfigError::InvalidPenaltyRate(self.penalty_rate));
        }

        if !(0.0..=1.0).contains(&self.breakdown_p) {
            return Err(ConfigError::InvalidBreakdownProbability(self.breakdown_p));
        }

        let (repair_min, repair_max) = self.repair_ticks;
        if repair_min == 0 || repair_min > repair_max {
            return Err(ConfigError::InvalidRepairRange {
                min: repair_min,
                max: repair_max,
            });
        }

        if self.base_fleet_size == 0 || self.base_fleet_size > self.max_fleet_size {
            return Err(ConfigError::InvalidFleetBounds {
                base: self.base_fleet_size,
                max: self.max_fleet_size,
            });
        }

        if self.gas_cost < 0 {
            return Err(ConfigError::NegativeGasCost(self.gas_cost));
        }

        if self.queue_min_fill == 0 {
            return Err(ConfigError::InvalidQueueMinFill);
        }

        if self.tier_earnings_unit <= 0 {
            return Err(ConfigError::InvalidEarningsUnit(self.tier_earnings_unit));
        }
        if self.growth_earnings_unit <= 0 {
            return Err(ConfigError::InvalidEarningsUnit(self.growth_earnings_unit));
        }

        if self.tier_step < 0 {
            return Err(ConfigError::NegativeTierStep(self.tier_step));
        }

        Ok(())
    }
}

// ============================================================================
// Errors and Snapshot
// ============================================================================

/// Runtime simulation error
///
/// A failing sub-step aborts the remainder of the tick; mutations from the
/// sub-steps that already ran stay in place. There is no automatic retry;
/// the host decides whether to re-run the tick.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("order source returned {got} orders, expected {expected}")]
    Source { expected: usize, got: usize },

    #[error("truck not found: {0}")]
    TruckNotFound(u32),

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("internal consistency: truck {truck_id} would carry two deliveries")]
    InconsistentAssignment { truck_id: u32 },
}

/// Read-only snapshot emitted at the end of each tick
///
/// This is the reporting boundary: the engine performs no I/O, a host drains
/// snapshots and renders or records them as it pleases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Tick index (1-based; the first `step()` reports tick 1)
    pub tick: usize,

    /// Sum of truck earnings minus this tick's penalty total (cents)
    pub total_revenue: i64,

    /// Penalties accrued by late queued orders this tick (cents).
    /// Deducted from reported revenue only, never from truck earnings.
    pub penalty_total: i64,

    /// `tick * fleet_size * gas_cost`; an estimate, since the fleet grew
    /// over time
    pub gas_spent_estimate: i64,

    /// Queued orders at or past the late threshold
    pub late_count: usize,

    /// Queued orders past the priority threshold but not yet late
    pub priority_count: usize,

    /// Orders generated this tick
    pub num_arrivals: usize,

    /// Deliveries completed this tick
    pub num_completed: usize,

    /// Queued orders (unordered)
    pub queue: Vec<Order>,

    /// Active deliveries
    pub deliveries: Vec<Delivery>,

    /// Fleet state, in roster order
    pub fleet: Vec<Truck>,
}

impl TickSnapshot {
    /// Serialize the snapshot to JSON for an external reporting sink
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Main engine owning all simulation state and the tick loop
///
/// The engine aggregates the order queue, the fleet, the delivery list, and
/// the tick counter; the only way to mutate them is `step()`.
pub struct Engine {
    /// Static configuration
    config: EngineConfig,

    /// Simulation state (fleet, orders, queue, deliveries)
    state: EngineState,

    /// Time management
    time: TimeManager,

    /// Deterministic RNG (shared by breakdowns, repairs, and the source)
    rng: RngManager,

    /// External order source
    source: Box<dyn OrderSource>,

    /// Event log (all simulation events)
    event_log: EventLog,
}

impl Engine {
    /// Create an engine with the default random order source
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let source = RandomOrderSource::new(config.price_range, config.distance_range);
        Self::with_source(config, Box::new(source))
    }

    /// Create an engine with an injected order source
    ///
    /// Validates the configuration fail-fast; per-order data is assumed to
    /// satisfy the source contract at runtime.
    pub fn with_source(
        config: EngineConfig,
        source: Box<dyn OrderSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            state: EngineState::new(config.base_fleet_size),
            time: TimeManager::new(),
            rng: RngManager::new(config.rng_seed),
            source,
            event_log: EventLog::new(),
            config,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get current tick number (0 before the first `step()`)
    pub fn current_tick(&self) -> usize {
        self.time.current_tick()
    }

    /// Get reference to simulation state
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get reference to the event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    // ========================================================================
    // Tick Loop
    // ========================================================================

    /// Execute one simulation tick and emit the reporting snapshot.
    ///
    /// Sub-steps run in a fixed order (deliveries, gas, breakdowns, aging,
    /// replenish, dispatch, growth, snapshot). On error the tick stops at
    /// the failing sub-step.
    pub fn step(&mut self) -> Result<TickSnapshot, SimulationError> {
        self.time.advance_tick();
        let tick = self.time.current_tick();

        // STEP 1: ADVANCE DELIVERIES
        // Completed deliveries credit the truck with the full order price;
        // late penalties never reduce truck earnings.
        let mut completed = Vec::new();
        self.state.deliveries.retain_mut(|delivery| {
            if delivery.advance() {
                completed.push(delivery.clone());
                false
            } else {
                true
            }
        });

        let num_completed = completed.len();
        for delivery in completed {
            let order = self
                .state
                .orders
                .get_mut(&delivery.order_id)
                .ok_or_else(|| SimulationError::OrderNotFound(delivery.order_id.clone()))?;
            let price = order.price();
            order.mark_delivered(tick);

            let truck = self
                .state
                .fleet
                .get_mut(delivery.truck_id)
                .ok_or(SimulationError::TruckNotFound(delivery.truck_id))?;
            truck.credit_delivery(price, self.config.tier_earnings_unit, self.config.tier_step);

            self.event_log.log(Event::DeliveryCompleted {
                tick,
                order_id: delivery.order_id,
                truck_id: delivery.truck_id,
                price,
            });
        }

        // STEP 2: CHARGE GAS
        // Unconditional: broken and delivering trucks pay like everyone else.
        for truck in self.state.fleet.trucks_mut() {
            truck.charge_gas(self.config.gas_cost);
        }

        // STEP 3: BREAKDOWNS / REPAIRS
        // Independent of delivery status: a truck can break mid-delivery and
        // the delivery still completes on schedule.
        for truck in self.state.fleet.trucks_mut() {
            if truck.is_broken() {
                if truck.tick_repair() {
                    self.event_log.log(Event::TruckRepaired {
                        tick,
                        truck_id: truck.id(),
                    });
                }
            } else if self.rng.bernoulli(self.config.breakdown_p) {
                let (min, max) = self.config.repair_ticks;
                let repair_ticks = self.rng.range_inclusive(min as i64, max as i64) as usize;
                truck.break_down(repair_ticks);
                self.event_log.log(Event::TruckBrokeDown {
                    tick,
                    truck_id: truck.id(),
                    repair_ticks,
                });
            }
        }

        // STEP 4: AGE QUEUED ORDERS
        let aging = self.state.queue.age_one_tick(
            &mut self.state.orders,
            self.config.late_threshold,
            self.config.penalty_rate,
        );
        let penalty_total = aging.penalty_total;
        for (order_id, penalty) in aging.newly_penalized {
            self.event_log.log(Event::OrderPenalized {
                tick,
                order_id,
                penalty,
            });
        }

        // STEP 5: REPLENISH FROM THE ORDER SOURCE
        let want = self.state.queue.shortfall(self.config.queue_min_fill, tick);
        let mut num_arrivals = 0;
        if want > 0 {
            let new_orders = self.source.generate(want, &mut self.rng);
            if new_orders.len() != want {
                return Err(SimulationError::Source {
                    expected: want,
                    got: new_orders.len(),
                });
            }
            for order in new_orders {
                self.event_log.log(Event::OrderArrived {
                    tick,
                    order_id: order.id().to_string(),
                    customer_id: order.customer_id(),
                    price: order.price(),
                    distance: order.distance(),
                });
                self.state.admit_order(order);
                num_arrivals += 1;
            }
        }

        // STEP 6: DISPATCH
        let assignments = dispatch::assign_idle_trucks(
            &self.state.fleet,
            &mut self.state.queue,
            &mut self.state.orders,
            &mut self.state.deliveries,
        )?;
        for assignment in assignments {
            self.event_log.log(Event::OrderAssigned {
                tick,
                order_id: assignment.order_id,
                truck_id: assignment.truck_id,
                remaining_ticks: assignment.remaining_ticks,
            });
        }

        // STEP 7: FLEET GROWTH
        if let Some(truck_id) = self.state.fleet.maybe_grow(
            self.config.base_fleet_size,
            self.config.max_fleet_size,
            self.config.growth_earnings_unit,
        ) {
            self.event_log.log(Event::TruckPurchased { tick, truck_id });
        }

        // STEP 8: SNAPSHOT
        Ok(self.snapshot(tick, penalty_total, num_arrivals, num_completed))
    }

    fn snapshot(
        &self,
        tick: usize,
        penalty_total: i64,
        num_arrivals: usize,
        num_completed: usize,
    ) -> TickSnapshot {
        let queue: Vec<Order> = self
            .state
            .queue
            .ids()
            .filter_map(|id| self.state.orders.get(id))
            .cloned()
            .collect();

        let late_count = queue
            .iter()
            .filter(|o| o.wait_ticks() >= self.config.late_threshold)
            .count();
        let priority_count = queue
            .iter()
            .filter(|o| {
                o.wait_ticks() >= self.config.priority_threshold
                    && o.wait_ticks() < self.config.late_threshold
            })
            .count();

        TickSnapshot {
            tick,
            total_revenue: self.state.fleet.total_earnings() - penalty_total,
            penalty_total,
            gas_spent_estimate: tick as i64 * self.state.fleet.len() as i64 * self.config.gas_cost,
            late_count,
            priority_count,
            num_arrivals,
            num_completed,
            queue,
            deliveries: self.state.deliveries.clone(),
            fleet: self.state.fleet.trucks().to_vec(),
        }
    }
}
