//! Authenticated Encryption with Associated Data (AEAD) algorithms

pub mod gcm;
