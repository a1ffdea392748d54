//! Construction-time configuration of a streaming GCM pair

use sgcm_api::error::validation;
use sgcm_api::Result;
use sgcm_params::utils::symmetric::{GCM_MIN_NONCE_SIZE, GCM_STANDARD_NONCE_SIZE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters fixed for the lifetime of an encryptor/decryptor pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StreamConfig {
    /// Exact nonce length accepted by `initialize`, in bytes
    pub nonce_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            nonce_size: GCM_STANDARD_NONCE_SIZE,
        }
    }
}

impl StreamConfig {
    /// Configuration with the standard 12-byte nonce
    pub fn new() -> Self {
        Self::default()
    }

    /// Use nonces of `nonce_size` bytes instead
    ///
    /// Any length other than 12 derives the initial counter through GHASH.
    pub fn with_nonce_size(mut self, nonce_size: usize) -> Self {
        self.nonce_size = nonce_size;
        self
    }

    /// Check the configuration before building a pair
    pub fn validate(&self) -> Result<()> {
        validation::parameter(
            self.nonce_size >= GCM_MIN_NONCE_SIZE,
            "stream config",
            "nonce size must be at least one byte",
        )
    }
}
