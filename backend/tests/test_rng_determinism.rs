//! Tests for deterministic RNG
//!
//! Same seed MUST produce the same sequence: weight init and learner noise
//! both depend on it for reproducible training runs.

use latent_bridge_core_rs::RngManager;

#[test]
fn test_rng_new_with_seed() {
    let rng = RngManager::new(12345);
    assert_eq!(rng.get_state(), 12345);
}

#[test]
fn test_rng_next_deterministic() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(12345);

    for _ in 0..100 {
        assert_eq!(rng1.next(), rng2.next(), "RNG not deterministic!");
    }
}

#[test]
fn test_rng_different_seeds_different_sequences() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(54321);

    assert_ne!(
        rng1.next(),
        rng2.next(),
        "Different seeds should produce different values"
    );
}

#[test]
fn test_rng_state_advances() {
    let mut rng = RngManager::new(12345);
    let initial_state = rng.get_state();

    rng.next();

    assert_ne!(initial_state, rng.get_state(), "RNG state should advance");
}

#[test]
fn test_next_f64_deterministic_and_bounded() {
    let mut rng1 = RngManager::new(99999);
    let mut rng2 = RngManager::new(99999);

    for _ in 0..1000 {
        let val1 = rng1.next_f64();
        let val2 = rng2.next_f64();
        assert_eq!(val1, val2, "next_f64() not deterministic");
        assert!((0.0..1.0).contains(&val1), "next_f64() produced {}", val1);
    }
}

#[test]
fn test_fork_is_deterministic() {
    let mut parent1 = RngManager::new(7);
    let mut parent2 = RngManager::new(7);

    let mut child1 = parent1.fork();
    let mut child2 = parent2.fork();

    for _ in 0..20 {
        assert_eq!(child1.next(), child2.next());
    }
    assert_eq!(parent1.get_state(), parent2.get_state());
}
