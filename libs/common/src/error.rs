//! Custom error types for the common library
//!
//! This module defines the validation errors raised while turning an
//! incoming session request into a typed [`NewSession`](crate::session::NewSession).

use thiserror::Error;

/// Error raised when a new-session payload is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The body could not be read as a JSON object
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// `type` is not one of the known session kinds
    #[error("Unknown session type '{0}', expected 'work' or 'break'")]
    UnknownKind(String),

    /// `duration` is not a whole number of minutes in range
    #[error("Invalid duration {value}: expected a whole number of minutes between {min} and {max}")]
    InvalidDuration { value: String, min: u32, max: u32 },
}

/// Type alias for Result with ValidationError
pub type ValidationResult<T> = Result<T, ValidationError>;
