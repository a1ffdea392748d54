//! Trait definitions for the sgcm API

pub mod online;

pub use online::{AeadDecryptor, AeadEncryptor};
