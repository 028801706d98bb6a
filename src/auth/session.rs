//! Session state and the injected session store.
//!
//! Sessions are explicit objects handed through application state; the
//! store is a trait so persistence can be swapped without touching the
//! handlers. No global, implicitly-read token storage anywhere.

use std::collections::HashMap;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::api::{DepartmentId, UserId};
use crate::auth::Role;

/// One authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub department_id: DepartmentId,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Injected storage interface for sessions.
pub trait SessionStore: Send + Sync {
    /// Create a session for the given account and return it.
    fn create(
        &self,
        user_id: UserId,
        username: &str,
        role: Role,
        department_id: DepartmentId,
    ) -> Session;

    /// Look up a session by token.
    fn get(&self, token: &str) -> Option<Session>;

    /// Revoke a session. Returns whether a session was removed.
    fn revoke(&self, token: &str) -> bool;
}

/// In-memory session store keyed by token.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn create(
        &self,
        user_id: UserId,
        username: &str,
        role: Role,
        department_id: DepartmentId,
    ) -> Session {
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id,
            username: username.to_string(),
            role,
            department_id,
            created_at: chrono::Utc::now(),
        };
        self.sessions
            .write()
            .insert(session.token.clone(), session.clone());
        session
    }

    fn get(&self, token: &str) -> Option<Session> {
        self.sessions.read().get(token).cloned()
    }

    fn revoke(&self, token: &str) -> bool {
        self.sessions.write().remove(token).is_some()
    }
}
