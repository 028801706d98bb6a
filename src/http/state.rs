//! Application state for the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::SessionStore;
use crate::db::repository::TimetableRepository;
use crate::services::generation::GenerationEngine;
use crate::services::job_tracker::JobTracker;
use crate::services::notifier::Notifier;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn TimetableRepository>,
    /// Tracker for generation jobs
    pub job_tracker: JobTracker,
    /// Session storage (injected; see auth::session)
    pub sessions: Arc<dyn SessionStore>,
    /// Generation engine boundary
    pub engine: Arc<dyn GenerationEngine>,
    /// Outbound message relay
    pub notifier: Arc<dyn Notifier>,
    /// Delay between engine status polls
    pub engine_poll_interval: Duration,
}

impl AppState {
    /// Create a new application state from its collaborators.
    pub fn new(
        repository: Arc<dyn TimetableRepository>,
        sessions: Arc<dyn SessionStore>,
        engine: Arc<dyn GenerationEngine>,
        notifier: Arc<dyn Notifier>,
        engine_poll_interval: Duration,
    ) -> Self {
        Self {
            repository,
            job_tracker: JobTracker::new(),
            sessions,
            engine,
            notifier,
            engine_poll_interval,
        }
    }
}
