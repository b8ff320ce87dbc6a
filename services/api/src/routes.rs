//! Session registry routes

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use common::NewSession;
use serde_json::json;
use tracing::warn;

use crate::{
    error::{ApiError, ApiResult},
    models::DeleteSessionQuery,
    state::AppState,
};

/// Create the router for the session registry
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/sessions",
            post(create_session)
                .get(get_sessions)
                .delete(delete_session)
                // `get` would otherwise answer HEAD
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "session-registry"
    }))
}

/// Create a new session
///
/// The body is taken raw so that a missing body and a missing
/// `Content-Type` both mean "use the defaults".
pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let session = NewSession::from_body(&body).map_err(|e| {
        warn!("Rejected session request: {}", e);
        ApiError::from(e)
    })?;

    let record = state.session_repository.create(&session).await;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Get all sessions
pub async fn get_sessions(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.session_repository.get_all().await)
}

/// Delete a session by ID. Unknown ids are not an error.
pub async fn delete_session(
    State(state): State<AppState>,
    Query(query): Query<DeleteSessionQuery>,
) -> ApiResult<StatusCode> {
    let id = query.session_id().map_err(|e| {
        warn!("Rejected delete request: {}", e);
        e
    })?;

    if let Some(id) = id {
        state.session_repository.delete_session(id).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Any method other than POST, GET or DELETE on `/sessions`
pub async fn method_not_allowed(method: Method) -> ApiError {
    warn!("Method {} not allowed on /sessions", method);
    ApiError::MethodNotAllowed(method)
}
