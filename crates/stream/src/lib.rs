//! Online (streaming) Galois/Counter Mode
//!
//! This crate turns the one-shot GCM engine of `sgcm-algorithms` into an
//! online AEAD: messages are encrypted, decrypted or verified fragment by
//! fragment, with output released as soon as complete blocks are available
//! and the authentication verdict delivered at finalization. For any
//! fragmentation of the input the result is bit-for-bit identical to
//! one-shot GCM.
//!
//! # Example
//!
//! ```
//! use sgcm_api::{AeadDecryptor, AeadEncryptor};
//! use sgcm_stream::aes128_streaming_gcm;
//!
//! let (mut enc, mut dec) = aes128_streaming_gcm(&[0x42; 16]).unwrap();
//! let nonce = [7u8; 12];
//!
//! let mut ciphertext = Vec::new();
//! enc.initialize(&nonce, b"header").unwrap();
//! enc.next(b"hello, ", &mut ciphertext).unwrap();
//! enc.next(b"streaming world", &mut ciphertext).unwrap();
//! enc.finalize(&mut ciphertext).unwrap();
//!
//! let (body, tag) = ciphertext.split_at(ciphertext.len() - enc.tag_size());
//! let mut plaintext = Vec::new();
//! dec.initialize(&nonce, b"header").unwrap();
//! dec.next(body, &mut plaintext).unwrap();
//! dec.finalize(tag, &mut plaintext).unwrap();
//! assert_eq!(plaintext, b"hello, streaming world");
//! ```
//!
//! # Security Notes
//!
//! - Nonces must never repeat under one key; generating them is up to the
//!   caller
//! - In decrypt mode plaintext is released before the tag is checked and
//!   must be discarded if finalization reports an authentication failure
//! - Tags are compared in constant time; buffered secrets are zeroized

#![forbid(unsafe_code)]

pub mod config;
pub mod decryptor;
pub mod encryptor;
pub mod state;
pub mod trailing;

#[cfg(feature = "std")]
pub mod io;

pub use config::StreamConfig;
pub use decryptor::GcmDecryptor;
pub use encryptor::GcmEncryptor;
pub use state::{Mode, Phase};
pub use trailing::TrailingTagDecryptor;

#[cfg(feature = "std")]
pub use io::{
    decrypt_stream, encrypt_stream, GcmDecryptWriter, GcmEncryptWriter, StreamingDecrypt,
    StreamingEncrypt,
};

use sgcm_algorithms::{Aes128, Aes192, Aes256, BlockCipher, Gcm};
use sgcm_api::Result;

/// Encryptor/decryptor pair sharing one key
pub type StreamingGcm<B> = (GcmEncryptor<B>, GcmDecryptor<B>);

/// Build an encryptor/decryptor pair for 12-byte nonces
pub fn new_streaming_gcm<B: BlockCipher>(cipher: B) -> Result<StreamingGcm<B>> {
    new_streaming_gcm_with_config(cipher, StreamConfig::default())
}

/// Build an encryptor/decryptor pair with an explicit configuration
///
/// The key schedule and hash subkey are computed once and cloned into the
/// two halves, which then keep fully independent message state.
pub fn new_streaming_gcm_with_config<B: BlockCipher>(
    cipher: B,
    config: StreamConfig,
) -> Result<StreamingGcm<B>> {
    config.validate()?;
    let gcm = Gcm::with_nonce_size(cipher, config.nonce_size)?;
    tracing::debug!(
        cipher = B::name(),
        nonce_size = config.nonce_size,
        "streaming GCM pair created"
    );
    let encryptor = GcmEncryptor::from_engine(gcm.clone());
    Ok((encryptor, GcmDecryptor::from_engine(gcm)))
}

/// AES-128 streaming GCM pair from a 16-byte key
pub fn aes128_streaming_gcm(key: &[u8]) -> Result<StreamingGcm<Aes128>> {
    new_streaming_gcm(Aes128::new(key)?)
}

/// AES-192 streaming GCM pair from a 24-byte key
pub fn aes192_streaming_gcm(key: &[u8]) -> Result<StreamingGcm<Aes192>> {
    new_streaming_gcm(Aes192::new(key)?)
}

/// AES-256 streaming GCM pair from a 32-byte key
pub fn aes256_streaming_gcm(key: &[u8]) -> Result<StreamingGcm<Aes256>> {
    new_streaming_gcm(Aes256::new(key)?)
}
