//! Block cipher implementations
//!
//! GCM only needs the forward direction of a 128-bit block cipher, so the
//! [`BlockCipher`] trait exposes encryption only.

use crate::error::Result;

pub mod aes;
pub mod modes;

// Re-exports
pub use aes::{Aes128, Aes192, Aes256};
pub use modes::ctr;

/// A keyed block cipher usable underneath counter mode
pub trait BlockCipher: Clone {
    /// Block size in bytes
    const BLOCK_SIZE: usize;

    /// Key size in bytes
    const KEY_SIZE: usize;

    /// Expand `key` into a cipher instance
    fn new(key: &[u8]) -> Result<Self>;

    /// Encrypt a single block in place
    ///
    /// `block` must be exactly [`Self::BLOCK_SIZE`] bytes long.
    fn encrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Algorithm name
    fn name() -> &'static str;
}
