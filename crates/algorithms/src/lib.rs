//! Cryptographic primitives underlying streaming GCM
//!
//! This crate provides the base engine consumed by `sgcm-stream`: a
//! [`BlockCipher`] abstraction with constant-time AES implementations, the
//! 32-bit counter mode used by GCM, the GHASH universal hash over
//! GF(2^128), and the one-shot [`Gcm`] AEAD which also exposes those
//! primitives to the streaming layer.
//!
//! # Security Features
//!
//! - Round keys, hash keys and keystream blocks are zeroized when dropped
//! - Tags are compared with `subtle` in constant time
//! - GF(2^8) and GF(2^128) arithmetic is branch-free

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Block cipher implementations
pub mod block;
pub use block::{Aes128, Aes192, Aes256, BlockCipher};

// AEAD implementations
pub mod aead;
pub use aead::gcm::{FieldElement, GHash, Gcm};
