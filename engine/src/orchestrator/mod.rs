//! Orchestrator - main simulation loop
//!
//! Implements the fixed-order tick sequence integrating all components.
//!
//! See `engine.rs` for full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{ConfigError, Engine, EngineConfig, SimulationError, TickSnapshot};
