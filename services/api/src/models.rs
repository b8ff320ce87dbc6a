//! API models for request and response payloads
//!
//! Session records themselves live in [`common::session`]; this module only
//! holds the shapes that are specific to the HTTP surface.

use common::SessionId;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

/// Query parameters for `DELETE /sessions`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteSessionQuery {
    /// Raw id; parsed by [`DeleteSessionQuery::session_id`] so a bad value
    /// is reported as an [`ApiError`] instead of an extractor rejection
    pub id: Option<String>,
}

impl DeleteSessionQuery {
    /// The requested session id.
    ///
    /// Any integer is accepted. One that no session could carry (negative or
    /// too large) yields `None`, which deletes nothing.
    pub fn session_id(&self) -> ApiResult<Option<SessionId>> {
        let raw = self.id.as_deref().ok_or(ApiError::MissingId)?;
        let trimmed = raw.trim();

        let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::InvalidId(raw.to_string()));
        }

        Ok(trimmed.parse().ok())
    }
}
