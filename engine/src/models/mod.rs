//! Domain models for the dispatch simulator

pub mod delivery;
pub mod event;
pub mod fleet;
pub mod order;
pub mod state;
pub mod truck;

// Re-exports
pub use delivery::Delivery;
pub use event::{Event, EventLog};
pub use fleet::Fleet;
pub use order::{Order, OrderStatus};
pub use state::EngineState;
pub use truck::Truck;
