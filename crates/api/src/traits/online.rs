//! Online authenticated encryption traits
//!
//! An online AEAD processes a message in one streaming pass. The caller feeds
//! fragments of any length and receives output as soon as it is available;
//! the authentication verdict is only known once the message is finalized.
//! The interface follows the online-AE model of Hoang, Reyhanitabar, Rogaway
//! and Vizár (<https://eprint.iacr.org/2015/189.pdf>).
//!
//! Output is always appended to a caller-owned buffer. Every method returns
//! the number of bytes it appended.

use crate::error::Result;

/// Streaming encryption half of an online AEAD
pub trait AeadEncryptor {
    /// Ciphertext expansion in bytes. Constant for a given implementation.
    fn tag_size(&self) -> usize;

    /// Start a new message with the given nonce and associated data.
    ///
    /// May be called at any time; a message in progress is abandoned.
    fn initialize(&mut self, nonce: &[u8], aad: &[u8]) -> Result<()>;

    /// Encrypt the next plaintext fragment, appending any ciphertext that
    /// became available to `out`.
    ///
    /// The number of bytes appended need not equal `fragment.len()`.
    fn next(&mut self, fragment: &[u8], out: &mut Vec<u8>) -> Result<usize>;

    /// Close the message: append the buffered ciphertext tail followed by the
    /// tag (`tag_size()` bytes).
    fn finalize(&mut self, out: &mut Vec<u8>) -> Result<usize>;
}

/// Streaming decryption half of an online AEAD
///
/// # Warning
///
/// When initialized with [`initialize`](Self::initialize), plaintext is
/// released by [`next`](Self::next) before the tag has been checked. If
/// [`finalize`](Self::finalize) reports an authentication failure the caller
/// must discard everything released for that message. Use
/// [`initialize_verify_only`](Self::initialize_verify_only) to authenticate
/// without producing plaintext.
pub trait AeadDecryptor {
    /// Ciphertext expansion in bytes. Constant for a given implementation.
    fn tag_size(&self) -> usize;

    /// Start decrypting a new message.
    fn initialize(&mut self, nonce: &[u8], aad: &[u8]) -> Result<()>;

    /// Start authenticating a new message without producing plaintext.
    fn initialize_verify_only(&mut self, nonce: &[u8], aad: &[u8]) -> Result<()>;

    /// Consume the next ciphertext fragment (without the tag), appending any
    /// plaintext that became available to `out`. Appends nothing in
    /// verify-only mode.
    fn next(&mut self, fragment: &[u8], out: &mut Vec<u8>) -> Result<usize>;

    /// Close the message and check `tag`.
    ///
    /// On success the remaining plaintext (if any, and unless verify-only)
    /// is appended to `out`. On an authentication failure nothing is
    /// appended and an error of class
    /// [`ErrorClass::Authentication`](crate::ErrorClass::Authentication) is
    /// returned.
    fn finalize(&mut self, tag: &[u8], out: &mut Vec<u8>) -> Result<usize>;
}
