//! Dispatch Simulator Core - Rust Engine
//!
//! Discrete-time delivery dispatch simulator with deterministic execution.
//! Models a priority queue of customer orders, a truck fleet with breakdown
//! and repair state, a greedy dispatcher, an order-aging penalty policy, and
//! an earnings-triggered fleet-growth controller.
//!
//! # Architecture
//!
//! - **core**: Time management (tick counter)
//! - **models**: Domain types (Order, Truck, Delivery, Fleet, EngineState)
//! - **queue**: Priority order queue and the aging/penalty policy
//! - **source**: Order source boundary (black-box order generation)
//! - **dispatch**: Greedy truck-to-order assignment
//! - **orchestrator**: Main simulation loop (`Engine::step`)
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. All randomness is deterministic (seeded RNG)
//! 3. Every order is either queued, in exactly one active delivery, or delivered
//! 4. A truck carries at most one active delivery at a time
//! 5. Truck tier and fleet size never decrease

// Module declarations
pub mod core;
pub mod dispatch;
pub mod models;
pub mod orchestrator;
pub mod queue;
pub mod rng;
pub mod source;

// Re-exports for convenience
pub use core::time::TimeManager;
pub use models::{
    delivery::Delivery,
    event::{Event, EventLog},
    fleet::Fleet,
    order::{Order, OrderStatus},
    state::EngineState,
    truck::Truck,
};
pub use orchestrator::{ConfigError, Engine, EngineConfig, SimulationError, TickSnapshot};
pub use queue::{AgingOutcome, OrderQueue};
pub use rng::RngManager;
pub use source::{OrderSource, RandomOrderSource};
