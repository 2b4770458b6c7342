use super::*;

#[test]
fn manual_clock_starts_at_zero() {
    let clock = ManualClock::new();
    assert_eq!(clock.now(), 0.0);
}

#[test]
fn manual_clock_set_and_advance() {
    let clock = ManualClock::new();
    clock.set(1.5);
    assert_eq!(clock.now(), 1.5);
    clock.advance(0.25);
    assert_eq!(clock.now(), 1.75);
}

#[test]
fn system_clock_is_monotonic() {
    let clock = SystemClock::new();
    let a = clock.now();
    let b = clock.now();
    assert!(b >= a);
    assert!(a >= 0.0);
}
