//! Session registry service
//!
//! An HTTP service that keeps an append-only, in-memory list of Pomodoro
//! session records with create, list and delete operations.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
