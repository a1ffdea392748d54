//! Error handling for cryptographic primitives

use sgcm_api::Error as CoreError;
use thiserror::Error as ThisError;

/// The error type for cryptographic primitives
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Parameter validation error
    #[error("Invalid parameter '{name}': {reason}")]
    Parameter {
        /// Name of the invalid parameter
        name: &'static str,
        /// Reason why the parameter is invalid
        reason: &'static str,
    },

    /// Length validation error
    #[error("Invalid length for {context}: expected {expected}, got {actual}")]
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Input exceeds a hard limit of the algorithm
    #[error("{context} exceeds the limit of {limit} bytes")]
    TooLarge {
        /// Input that was too large
        context: &'static str,
        /// Largest accepted size in bytes
        limit: u64,
    },

    /// Authentication failure (e.g., AEAD tag verification)
    #[error("Authentication failed for {algorithm}")]
    Authentication {
        /// Algorithm that failed authentication
        algorithm: &'static str,
    },
}

/// Result type for cryptographic primitives operations
pub type Result<T> = core::result::Result<T, Error>;

impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parameter { name, reason } => CoreError::InvalidParameter {
                context: name,
                message: reason.to_string(),
            },
            Error::Length {
                context,
                expected,
                actual,
            } => CoreError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::TooLarge { context, limit } => CoreError::MessageTooLarge { context, limit },
            Error::Authentication { algorithm } => {
                CoreError::AuthenticationFailed { context: algorithm }
            }
        }
    }
}

// Include the validation submodule
pub mod validate;
