//! Application state shared across handlers

use crate::repositories::SessionRepository;

/// Application state shared across handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub session_repository: SessionRepository,
}

impl AppState {
    /// Fresh state with an empty registry
    pub fn new() -> Self {
        Self::default()
    }
}
