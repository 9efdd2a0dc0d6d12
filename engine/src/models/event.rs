//! Event logging for simulation replay and auditing.
//!
//! Events capture the significant state changes of each tick in the order
//! they occur. The engine performs no I/O; the event log is the observability
//! surface a host can drain, print, or assert against in tests.

use serde::{Deserialize, Serialize};

/// Simulation event capturing a state change.
///
/// All events include a tick number for temporal ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// New order arrived from the order source and entered the queue
    OrderArrived {
        tick: usize,
        order_id: String,
        customer_id: u32,
        price: i64,
        distance: usize,
    },

    /// Dispatcher assigned a queued order to an idle, healthy truck
    OrderAssigned {
        tick: usize,
        order_id: String,
        truck_id: u32,
        remaining_ticks: usize,
    },

    /// Delivery reached its destination; truck credited the full price
    DeliveryCompleted {
        tick: usize,
        order_id: String,
        truck_id: u32,
        price: i64,
    },

    /// Truck broke down (possibly mid-delivery)
    TruckBrokeDown {
        tick: usize,
        truck_id: u32,
        repair_ticks: usize,
    },

    /// Truck finished its repair countdown
    TruckRepaired { tick: usize, truck_id: u32 },

    /// Queued order crossed the late threshold for the first time
    OrderPenalized {
        tick: usize,
        order_id: String,
        penalty: i64,
    },

    /// Fleet growth controller purchased a new truck
    TruckPurchased { tick: usize, truck_id: u32 },
}

impl Event {
    /// Tick the event occurred at
    pub fn tick(&self) -> usize {
        match self {
            Event::OrderArrived { tick, .. }
            | Event::OrderAssigned { tick, .. }
            | Event::DeliveryCompleted { tick, .. }
            | Event::TruckBrokeDown { tick, .. }
            | Event::TruckRepaired { tick, .. }
            | Event::OrderPenalized { tick, .. }
            | Event::TruckPurchased { tick, .. } => *tick,
        }
    }
}

/// Append-only log of all simulation events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in occurrence order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events that occurred at the given tick
    pub fn at_tick(&self, tick: usize) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.tick() == tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_preserves_order_and_tick_filter() {
        let mut log = EventLog::new();
        log.log(Event::TruckPurchased { tick: 1, truck_id: 11 });
        log.log(Event::TruckRepaired { tick: 2, truck_id: 3 });
        log.log(Event::TruckPurchased { tick: 2, truck_id: 12 });

        assert_eq!(log.len(), 3);
        assert_eq!(log.at_tick(2).count(), 2);
        assert_eq!(log.events()[0].tick(), 1);
    }
}
