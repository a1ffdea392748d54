//! Constants for symmetric encryption algorithms

/// AES-128 key size in bytes
pub const AES128_KEY_SIZE: usize = 16;

/// AES-192 key size in bytes
pub const AES192_KEY_SIZE: usize = 24;

/// AES-256 key size in bytes
pub const AES256_KEY_SIZE: usize = 32;

/// AES block size in bytes
pub const AES_BLOCK_SIZE: usize = 16;

/// GCM operates on 128-bit blocks only
pub const GCM_BLOCK_SIZE: usize = 16;

/// GCM authentication tag size in bytes
pub const GCM_TAG_SIZE: usize = 16;

/// Recommended GCM nonce size in bytes (96 bits)
pub const GCM_STANDARD_NONCE_SIZE: usize = 12;

/// Smallest nonce accepted by the extended-nonce variant
pub const GCM_MIN_NONCE_SIZE: usize = 1;

/// Number of blocks one GCM invocation may encrypt before the 32-bit
/// counter would wrap into the tag mask block
pub const GCM_MAX_BLOCKS: u64 = (1 << 32) - 2;

/// Maximum plaintext/ciphertext length of one GCM message in bytes
pub const GCM_MAX_MESSAGE_SIZE: u64 = GCM_MAX_BLOCKS * GCM_BLOCK_SIZE as u64;
