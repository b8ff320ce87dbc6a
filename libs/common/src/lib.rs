//! Common library for the Pomodoro application
//!
//! This crate provides the session record model and validation shared by the
//! session registry service and the timer client.

pub mod error;
pub mod session;

pub use error::{ValidationError, ValidationResult};
pub use session::{NewSession, SessionId, SessionKind, SessionRecord, SessionStatus};

/// Example usage of the session module
///
/// ```rust
/// use common::session::{NewSession, SessionKind, SessionRecord};
///
/// let request = NewSession::from_body(br#"{"type":"break","duration":5}"#).unwrap();
/// assert_eq!(request.kind, SessionKind::Break);
///
/// let record = SessionRecord::new(1, &request);
/// assert_eq!(record.duration, 300_000);
/// ```
pub fn example_usage() {}
