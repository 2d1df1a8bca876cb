//! At-rest obfuscation of persisted records
//!
//! A self-inverse byte transform applied to every serialized record line
//! before it is written. This is NOT a security boundary: the stock XOR
//! transform only keeps credentials out of casual plaintext view.
//! Deployments wanting real confidentiality supply their own transform.

use crate::error::{CofferError, Result};

/// Key baked into stock deployments. Swap via configuration.
pub const DEFAULT_OBFUSCATION_KEY: &[u8] = b"coffer_key_v1";

/// Reversible byte transform applied to whole serialized record lines.
///
/// Implementations must be self-inverse: `apply(apply(x)) == x`.
pub trait Obfuscator {
    fn apply(&self, bytes: &[u8]) -> Vec<u8>;
}

/// XOR against a fixed repeating key
pub struct XorObfuscator {
    key: Vec<u8>,
}

impl XorObfuscator {
    /// Create an obfuscator with the given key. An empty key is rejected.
    pub fn new(key: impl Into<Vec<u8>>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(CofferError::EmptyKey);
        }
        Ok(Self { key })
    }

    /// Create an obfuscator with the stock key
    pub fn with_default_key() -> Self {
        Self {
            key: DEFAULT_OBFUSCATION_KEY.to_vec(),
        }
    }
}

impl Obfuscator for XorObfuscator {
    fn apply(&self, bytes: &[u8]) -> Vec<u8> {
        bytes
            .iter()
            .enumerate()
            .map(|(i, b)| b ^ self.key[i % self.key.len()])
            .collect()
    }
}
