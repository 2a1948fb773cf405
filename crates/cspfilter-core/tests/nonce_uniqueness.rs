#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::HashSet;

use cspfilter_core::nonce::NONCE_HEX_LEN;
use cspfilter_core::NonceGenerator;

#[test]
fn ten_thousand_nonces_are_distinct_hex() {
    let gen = NonceGenerator::new().expect("os rng");
    let mut seen = HashSet::with_capacity(10_000);
    for _ in 0..10_000 {
        let nonce = gen.generate();
        assert_eq!(nonce.len(), NONCE_HEX_LEN);
        assert!(hex::decode(&nonce).is_ok());
        assert!(nonce.chars().all(|c| !c.is_ascii_uppercase()));
        assert!(seen.insert(nonce), "duplicate nonce");
    }
}

#[test]
fn generators_are_independent_handles() {
    let a = NonceGenerator::new().unwrap();
    let b = a.clone();
    assert_ne!(a.generate(), b.generate());
}
