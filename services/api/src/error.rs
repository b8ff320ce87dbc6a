//! Custom error types for the session registry service

use axum::{
    Json,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use common::ValidationError;
use serde_json::json;
use thiserror::Error;

/// Methods served on `/sessions`, as advertised in the `Allow` header
pub const ALLOWED_METHODS: &str = "POST, GET, DELETE";

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request used a method the sessions resource does not serve
    #[error("Method {0} Not Allowed")]
    MethodNotAllowed(Method),

    /// Create request failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Delete request carried no `id` query parameter
    #[error("Missing session id")]
    MissingId,

    /// Delete request carried an id that is not an integer
    #[error("Invalid session id '{0}'")]
    InvalidId(String),
}

impl ApiError {
    /// Status code this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Validation(_) | ApiError::MissingId | ApiError::InvalidId(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string(),
        }));

        let mut response = (status, body).into_response();
        if let ApiError::MethodNotAllowed(_) = self {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }

        response
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_not_allowed_sets_allow_header() {
        let response = ApiError::MethodNotAllowed(Method::PUT).into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get(header::ALLOW).unwrap(),
            "POST, GET, DELETE"
        );
    }

    #[test]
    fn test_validation_is_bad_request() {
        let err = ApiError::from(ValidationError::UnknownKind("nap".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Unknown session type 'nap', expected 'work' or 'break'"
        );
    }

    #[test]
    fn test_invalid_id_message() {
        let err = ApiError::InvalidId("abc".into());
        assert_eq!(err.to_string(), "Invalid session id 'abc'");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingId.status(), StatusCode::BAD_REQUEST);
    }
}
