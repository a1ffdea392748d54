//! Error type definitions for streaming AEAD operations

use thiserror::Error as ThisError;

/// Broad classification of an [`Error`]
///
/// Streaming GCM distinguishes caller misuse and hard cryptographic limits,
/// which end the current message, from a failed tag check, which is an
/// expected outcome of decrypting untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Contract violation or hard limit; the current message cannot continue
    Precondition,
    /// The ciphertext, associated data or tag is not authentic
    Authentication,
    /// Failure outside the cipher itself (e.g. the underlying writer)
    Other,
}

/// Primary error type for sgcm operations
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Invalid parameter error
    #[error("{context}: {message}")]
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// Invalid length error with context
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Operation called in a phase of the message lifecycle that forbids it
    #[error("{operation}: not allowed while {phase}")]
    InvalidState {
        operation: &'static str,
        phase: &'static str,
    },

    /// Cumulative message length would exceed the counter space
    #[error("{context}: message exceeds the limit of {limit} bytes")]
    MessageTooLarge {
        context: &'static str,
        limit: u64,
    },

    /// Authentication failed error
    #[error("Authentication failed: {context}")]
    AuthenticationFailed {
        context: &'static str,
    },

    /// Other error
    #[error("{context}: {message}")]
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for sgcm operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Classify this error
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidParameter { .. }
            | Self::InvalidLength { .. }
            | Self::InvalidState { .. }
            | Self::MessageTooLarge { .. } => ErrorClass::Precondition,
            Self::AuthenticationFailed { .. } => ErrorClass::Authentication,
            Self::Other { .. } => ErrorClass::Other,
        }
    }

    /// True when the message must be treated as not authentic
    pub fn is_authentication_failure(&self) -> bool {
        self.class() == ErrorClass::Authentication
    }

    /// True for contract violations and hard limits
    pub fn is_precondition_violation(&self) -> bool {
        self.class() == ErrorClass::Precondition
    }
}
