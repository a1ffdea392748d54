//! Constant values for sgcm cryptographic operations
//!
//! This library provides the sizes and limits shared by the block cipher,
//! the one-shot GCM engine and the streaming layer.

#![no_std]

pub mod utils;
