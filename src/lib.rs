//! # sgcm
//!
//! Online (streaming) AES-GCM: encrypt, decrypt or verify a message in
//! fragments of any size, with output identical to one-shot GCM.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! sgcm = "0.3"
//! ```
//!
//! ## Features
//!
//! - `std` (default): `std::io` reader/writer adapters
//! - `serde`: serializable [`stream::StreamConfig`]
//! - `full`: All features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`api`] (`sgcm-api`): Error type and the online AEAD traits
//! - [`params`] (`sgcm-params`): Algorithm constants
//! - [`algorithms`] (`sgcm-algorithms`): AES, counter mode, GHASH and one-shot GCM
//! - [`stream`] (`sgcm-stream`): The streaming encryptor, decryptor and adapters

pub use sgcm_algorithms as algorithms;
pub use sgcm_api as api;
pub use sgcm_params as params;
pub use sgcm_stream as stream;

/// Common imports for sgcm users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, ErrorClass, Result};

    // Re-export core traits
    pub use crate::api::{AeadDecryptor, AeadEncryptor};
    pub use crate::algorithms::BlockCipher;

    // Ciphers and engines
    pub use crate::algorithms::{Aes128, Aes192, Aes256, Gcm};
    pub use crate::stream::{
        aes128_streaming_gcm, aes192_streaming_gcm, aes256_streaming_gcm, new_streaming_gcm,
        new_streaming_gcm_with_config, GcmDecryptor, GcmEncryptor, StreamConfig,
        TrailingTagDecryptor,
    };

    #[cfg(feature = "std")]
    pub use crate::stream::{
        decrypt_stream, encrypt_stream, GcmDecryptWriter, GcmEncryptWriter, StreamingDecrypt,
        StreamingEncrypt,
    };
}
