//! Session record model shared by the registry and its clients
//!
//! A session record is the registry's view of one requested work or break
//! interval. Records are created from a loosely typed JSON payload which is
//! validated into a [`NewSession`] before anything is stored.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ValidationError, ValidationResult};

/// Milliseconds in one minute
pub const MILLIS_PER_MINUTE: u64 = 60_000;

/// Minutes used when a request omits `duration`
pub const DEFAULT_SESSION_MINUTES: u32 = 25;

/// Smallest accepted session length in minutes
pub const MIN_SESSION_MINUTES: u32 = 1;

/// Largest accepted session length in minutes (one day)
pub const MAX_SESSION_MINUTES: u32 = 24 * 60;

/// Registry-assigned session identifier
pub type SessionId = u64;

/// Kind of interval a session represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    #[default]
    Work,
    Break,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Work => "work",
            SessionKind::Break => "break",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SessionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(SessionKind::Work),
            "break" => Ok(SessionKind::Break),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// Lifecycle status of a record. Records never leave `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Active,
}

/// A stored session record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    /// Requested length in milliseconds
    pub duration: u64,
    pub status: SessionStatus,
}

impl SessionRecord {
    /// Build the record stored for `session` under `id`
    pub fn new(id: SessionId, session: &NewSession) -> Self {
        Self {
            id,
            kind: session.kind,
            duration: session.duration_millis(),
            status: SessionStatus::Active,
        }
    }
}

/// Raw create-session body as it arrives on the wire
///
/// Both fields are optional and kept untyped so that bad values surface as
/// [`ValidationError`]s rather than opaque deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSessionPayload {
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
    #[serde(default)]
    pub duration: Option<Value>,
}

/// A validated create-session request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewSession {
    #[serde(rename = "type")]
    pub kind: SessionKind,
    #[serde(rename = "duration")]
    pub minutes: u32,
}

impl Default for NewSession {
    fn default() -> Self {
        Self {
            kind: SessionKind::Work,
            minutes: DEFAULT_SESSION_MINUTES,
        }
    }
}

impl NewSession {
    /// Create a request, checking the minute range
    pub fn new(kind: SessionKind, minutes: u32) -> ValidationResult<Self> {
        let minutes = check_minutes(u64::from(minutes), || minutes.to_string())?;
        Ok(Self { kind, minutes })
    }

    /// Parse and validate a raw request body. An empty body means "all defaults".
    pub fn from_body(body: &[u8]) -> ValidationResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;

        // Derived Deserialize would also take a positional array
        if !value.is_object() {
            return Err(ValidationError::MalformedBody(format!(
                "expected a JSON object, got {value}"
            )));
        }

        let payload: CreateSessionPayload = serde_json::from_value(value)
            .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;

        Self::from_payload(payload)
    }

    /// Validate an already decoded payload, applying defaults for missing fields
    pub fn from_payload(payload: CreateSessionPayload) -> ValidationResult<Self> {
        let kind = match payload.kind {
            None => SessionKind::default(),
            Some(Value::String(s)) => s.parse()?,
            Some(other) => return Err(ValidationError::UnknownKind(other.to_string())),
        };

        let minutes = match payload.duration {
            None => DEFAULT_SESSION_MINUTES,
            Some(value) => parse_minutes(&value)?,
        };

        Ok(Self { kind, minutes })
    }

    /// Requested length in milliseconds
    pub fn duration_millis(&self) -> u64 {
        u64::from(self.minutes) * MILLIS_PER_MINUTE
    }
}

fn parse_minutes(value: &Value) -> ValidationResult<u32> {
    let invalid = || value.to_string();

    let Value::Number(number) = value else {
        return Err(invalid_duration(invalid()));
    };

    if let Some(whole) = number.as_u64() {
        return check_minutes(whole, invalid);
    }

    // 25.0 is a whole number of minutes, 2.5 is not
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= 0.0 && f <= f64::from(MAX_SESSION_MINUTES) => {
            check_minutes(f as u64, invalid)
        }
        _ => Err(invalid_duration(invalid())),
    }
}

fn check_minutes(minutes: u64, raw: impl FnOnce() -> String) -> ValidationResult<u32> {
    if (u64::from(MIN_SESSION_MINUTES)..=u64::from(MAX_SESSION_MINUTES)).contains(&minutes) {
        Ok(minutes as u32)
    } else {
        Err(invalid_duration(raw()))
    }
}

fn invalid_duration(value: String) -> ValidationError {
    ValidationError::InvalidDuration {
        value,
        min: MIN_SESSION_MINUTES,
        max: MAX_SESSION_MINUTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_uses_defaults() {
        let session = NewSession::from_body(b"").expect("empty body is valid");
        assert_eq!(session, NewSession::default());
        assert_eq!(session.duration_millis(), 1_500_000);

        let session = NewSession::from_body(b"{}").expect("empty object is valid");
        assert_eq!(session.kind, SessionKind::Work);
        assert_eq!(session.minutes, 25);
    }

    #[test]
    fn test_break_payload() {
        let session = NewSession::from_body(br#"{"type":"break","duration":5}"#).unwrap();
        assert_eq!(session.kind, SessionKind::Break);
        assert_eq!(session.duration_millis(), 300_000);
    }

    #[test]
    fn test_integral_float_duration_is_accepted() {
        let session = NewSession::from_body(br#"{"duration":25.0}"#).unwrap();
        assert_eq!(session.minutes, 25);
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let session = NewSession::from_body(br#"{"type":null,"duration":null}"#).unwrap();
        assert_eq!(session, NewSession::default());
    }

    #[test]
    fn test_rejects_bad_duration() {
        for body in [
            r#"{"duration":"abc"}"#,
            r#"{"duration":"25"}"#,
            r#"{"duration":2.5}"#,
            r#"{"duration":0}"#,
            r#"{"duration":-3}"#,
            r#"{"duration":1441}"#,
            r#"{"duration":true}"#,
        ] {
            let err = NewSession::from_body(body.as_bytes()).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidDuration { .. }),
                "{body} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let err = NewSession::from_body(br#"{"type":"nap"}"#).unwrap_err();
        assert_eq!(err, ValidationError::UnknownKind("nap".to_string()));

        let err = NewSession::from_body(br#"{"type":3}"#).unwrap_err();
        assert_eq!(err, ValidationError::UnknownKind("3".to_string()));
    }

    #[test]
    fn test_rejects_non_object_body() {
        for body in ["not json", "[1,2]", r#"["break",5]"#, "42", "null"] {
            let err = NewSession::from_body(body.as_bytes()).unwrap_err();
            assert!(matches!(err, ValidationError::MalformedBody(_)), "{body}");
        }
    }

    #[test]
    fn test_record_wire_shape() {
        let record = SessionRecord::new(1, &NewSession::default());
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"id": 1, "type": "work", "duration": 1_500_000, "status": "active"})
        );
    }

    #[test]
    fn test_new_session_serializes_as_request_body() {
        let session = NewSession::new(SessionKind::Work, 1).unwrap();
        assert_eq!(
            serde_json::to_value(session).unwrap(),
            json!({"type": "work", "duration": 1})
        );
        assert!(NewSession::new(SessionKind::Work, 0).is_err());
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        assert_eq!("break".parse::<SessionKind>().unwrap(), SessionKind::Break);
        assert_eq!(SessionKind::Work.to_string(), "work");
    }
}
