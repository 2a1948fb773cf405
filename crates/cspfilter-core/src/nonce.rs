//! Script nonce source.
//!
//! Each nonce is the lowercase hex SHA-1 digest of the decimal form of a
//! random `i64` drawn from the calling thread's CSPRNG. Thread-local
//! generators mean concurrent requests never contend on a shared lock.

use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use sha1::{Digest, Sha1};

use crate::error::{CspError, Result};

/// Hex length of a nonce (160-bit digest).
pub const NONCE_HEX_LEN: usize = 40;

/// Nonce service. Build once at startup with [`NonceGenerator::new`].
#[derive(Debug, Clone)]
pub struct NonceGenerator {
    _probed: (),
}

impl NonceGenerator {
    /// Verify the OS entropy source is usable. Failure is fatal for the
    /// filter: it must not serve pages without a nonce source.
    pub fn new() -> Result<Self> {
        let mut probe = [0u8; 4];
        OsRng
            .try_fill_bytes(&mut probe)
            .map_err(|e| CspError::RandomSource(e.to_string()))?;
        Ok(Self { _probed: () })
    }

    pub fn generate(&self) -> String {
        let value: i64 = rand::thread_rng().gen();
        hex::encode(Sha1::digest(value.to_string().as_bytes()))
    }
}
