//! Public API traits and types for the sgcm library
//!
//! This crate provides the public API surface shared by the sgcm crates:
//! the unified error type and the online AEAD traits implemented by the
//! streaming GCM engine.

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, ErrorClass, Result};

pub use traits::{AeadDecryptor, AeadEncryptor};
