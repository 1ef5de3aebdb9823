//! Determinism tests - the same seed produces identical runs

use ballpit_core::tests::test_helpers::run_pool;
use ballpit_core::{CollisionConfig, SimConfig, Variant, Viewport};

fn pool(seed: u64) -> SimConfig {
    SimConfig::new(Variant::Collisions(
        CollisionConfig::default().with_particle_count(60),
    ))
    .with_viewport(Viewport::new(500.0, 400.0).unwrap())
    .with_seed(seed)
}

#[test]
fn test_same_seed_same_run() {
    let a = run_pool(pool(5), 200);
    let b = run_pool(pool(5), 200);
    assert_eq!(a, b, "Running the same seed twice should be bit-identical");
}

#[test]
fn test_different_seed_different_run() {
    let a = run_pool(pool(5), 10);
    let b = run_pool(pool(6), 10);
    assert_ne!(a, b);
}

#[test]
fn test_pool_size_matches_config() {
    assert_eq!(run_pool(pool(1), 0).len(), 60);
}
