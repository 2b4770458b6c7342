use super::*;

#[test]
fn clamp01_bounds() {
    assert_eq!(clamp01(-0.5), 0.0);
    assert_eq!(clamp01(0.25), 0.25);
    assert_eq!(clamp01(1.5), 1.0);
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
    assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
    assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
}

#[test]
fn mul_div255_identities() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 0), 0);
}

#[test]
fn add_sat_saturates() {
    assert_eq!(add_sat_u8(200, 100), 255);
    assert_eq!(add_sat_u8(1, 2), 3);
}

#[test]
fn splitmix_is_deterministic_per_seed() {
    let mut a = Splitmix64::new(42);
    let mut b = Splitmix64::new(42);
    for _ in 0..16 {
        assert_eq!(a.next_u64(), b.next_u64());
    }

    let mut c = Splitmix64::new(43);
    let mut d = Splitmix64::new(42);
    assert_ne!(c.next_u64(), d.next_u64());
}

#[test]
fn splitmix_f64_stays_in_unit_interval() {
    let mut rng = Splitmix64::new(7);
    for _ in 0..1000 {
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn splitmix_index_stays_in_range() {
    let mut rng = Splitmix64::new(9);
    for _ in 0..1000 {
        assert!(rng.next_index(7) < 7);
    }
}
