//! In-memory session repository
//!
//! The registry keeps every record in process memory for the lifetime of the
//! service. Nothing is persisted; a restart starts again from id 1.

use std::sync::Arc;

use common::{NewSession, SessionId, SessionRecord};
use tokio::sync::Mutex;
use tracing::info;

/// Record list plus the id counter that feeds it
#[derive(Debug)]
struct SessionLog {
    next_id: SessionId,
    records: Vec<SessionRecord>,
}

impl Default for SessionLog {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

/// Session repository shared by every request handler
#[derive(Debug, Clone, Default)]
pub struct SessionRepository {
    log: Arc<Mutex<SessionLog>>,
}

impl SessionRepository {
    /// Create a new, empty session repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new session and return the created record
    pub async fn create(&self, session: &NewSession) -> SessionRecord {
        let mut log = self.log.lock().await;

        let id = log.next_id;
        log.next_id += 1;

        let record = SessionRecord::new(id, session);
        log.records.push(record.clone());

        info!(
            "Created session {} ({}, {} ms)",
            record.id, record.kind, record.duration
        );
        record
    }

    /// All stored sessions in insertion order
    pub async fn get_all(&self) -> Vec<SessionRecord> {
        self.log.lock().await.records.clone()
    }

    /// Delete a session by ID. Returns whether a record was removed.
    pub async fn delete_session(&self, id: SessionId) -> bool {
        let mut log = self.log.lock().await;

        let before = log.records.len();
        log.records.retain(|record| record.id != id);
        let deleted = log.records.len() < before;

        if deleted {
            info!("Deleted session {}", id);
        } else {
            info!("Delete requested for unknown session {}", id);
        }
        deleted
    }
}
