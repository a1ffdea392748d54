//! Error handling for the sgcm ecosystem

pub mod types;
pub mod validate;

// Re-export the primary error type and result
pub use types::{Error, ErrorClass, Result};

// Re-export validation utilities module (not as a nested function)
pub use validate as validation;

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Other {
            context: "I/O operation",
            message: e.to_string(),
        }
    }
}
