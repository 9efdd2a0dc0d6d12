//! Tests for TimeManager

use dispatch_simulator_core_rs::TimeManager;

#[test]
fn test_time_manager_new() {
    let time = TimeManager::new();
    assert_eq!(time.current_tick(), 0);
}

#[test]
fn test_advance_tick() {
    let mut time = TimeManager::new();

    time.advance_tick();
    assert_eq!(time.current_tick(), 1);

    time.advance_tick();
    assert_eq!(time.current_tick(), 2);
}

#[test]
fn test_many_ticks() {
    let mut time = TimeManager::new();
    for _ in 0..1000 {
        time.advance_tick();
    }
    assert_eq!(time.current_tick(), 1000);
}
