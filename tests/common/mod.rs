//! Shared fixtures: deterministic key pairs, generated once per test binary.

#![allow(dead_code)]

use std::sync::OnceLock;

use asymmetric_rsa::{KeyGenerator, KeyStrength, PemKeyPair};
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

// WARNING: seeded keys are for tests only.
fn seeded(seed: u8, strength: KeyStrength) -> PemKeyPair {
    let mut rng = ChaCha8Rng::from_seed([seed; 32]);
    KeyGenerator::new()
        .generate_with_rng(&mut rng, strength)
        .expect("key generation")
}

pub fn keys_1024() -> &'static PemKeyPair {
    static KEYS: OnceLock<PemKeyPair> = OnceLock::new();
    KEYS.get_or_init(|| seeded(1, KeyStrength::Rsa1024))
}

pub fn keys_2048() -> &'static PemKeyPair {
    static KEYS: OnceLock<PemKeyPair> = OnceLock::new();
    KEYS.get_or_init(|| seeded(2, KeyStrength::Rsa2048))
}

pub fn other_keys_2048() -> &'static PemKeyPair {
    static KEYS: OnceLock<PemKeyPair> = OnceLock::new();
    KEYS.get_or_init(|| seeded(3, KeyStrength::Rsa2048))
}

pub fn keys_4096() -> &'static PemKeyPair {
    static KEYS: OnceLock<PemKeyPair> = OnceLock::new();
    KEYS.get_or_init(|| seeded(4, KeyStrength::Rsa4096))
}

pub fn init_tracing() {
    static ONCE: std::sync::Once = std::sync::Once::new();
    ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    });
}
