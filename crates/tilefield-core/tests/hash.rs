use rand::prelude::*;
use tilefield_core::hash::{cell_hash, hash01, SALT_BASE, SALT_HOT};

#[test]
fn values_fall_in_unit_interval() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..10_000 {
        let h = hash01(rng.gen());
        assert!((0.0..1.0).contains(&h), "{h}");
    }
}

#[test]
fn cell_hash_is_a_pure_function_of_index() {
    for idx in [0usize, 1, 17, 4_000, 1 << 20] {
        assert_eq!(cell_hash(idx, SALT_BASE).to_bits(), cell_hash(idx, SALT_BASE).to_bits());
    }
    assert_eq!(cell_hash(5, SALT_BASE), hash01(5u32.wrapping_mul(SALT_BASE)));
}

#[test]
fn hot_tiles_show_up_at_roughly_the_configured_rate() {
    let hot = (0..20_000usize).filter(|i| cell_hash(*i, SALT_HOT) < 0.22).count();
    let rate = hot as f32 / 20_000.0;
    assert!((0.15..0.30).contains(&rate), "rate={rate}");
}
