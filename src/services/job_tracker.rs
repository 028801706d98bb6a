//! Tracking for asynchronous timetable-generation jobs.
//!
//! The submit/poll pattern against the external engine is a small state
//! machine: `Pending -> Success | Failure`, transitioning only when a poll
//! of the engine reports a terminal status. The tracker stores one entry
//! per job, including progress logs streamed to the frontend over SSE.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::TimetableId;

/// A single log entry with timestamp and message.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Generation job status. Terminal variants carry their payload so callers
/// never have to pair a status flag with a separate result field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Success { timetable_id: TimetableId },
    Failure { error: String },
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Pending)
    }
}

/// Job metadata and logs.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Job {
    pub job_id: String,
    pub status: JobStatus,
    pub logs: Vec<LogEntry>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// In-memory job tracker.
#[derive(Clone)]
pub struct JobTracker {
    jobs: Arc<RwLock<HashMap<String, Job>>>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new pending job and return its ID.
    pub fn create_job(&self) -> String {
        let job_id = Uuid::new_v4().to_string();
        let job = Job {
            job_id: job_id.clone(),
            status: JobStatus::Pending,
            logs: vec![],
            created_at: chrono::Utc::now(),
            completed_at: None,
        };
        self.jobs.write().insert(job_id.clone(), job);
        job_id
    }

    /// Add a log entry to a job.
    pub fn log(&self, job_id: &str, level: LogLevel, message: impl Into<String>) {
        let mut jobs = self.jobs.write();
        if let Some(job) = jobs.get_mut(job_id) {
            job.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level,
                message: message.into(),
            });
        }
    }

    /// Transition a pending job to `Success`. Terminal jobs never change
    /// again; a late or duplicate poll response is ignored.
    pub fn succeed_job(&self, job_id: &str, timetable_id: TimetableId) {
        let mut jobs = self.jobs.write();
        if let Some(job) = jobs.get_mut(job_id) {
            if job.status.is_terminal() {
                return;
            }
            job.status = JobStatus::Success { timetable_id };
            job.completed_at = Some(chrono::Utc::now());
            job.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level: LogLevel::Success,
                message: format!("Timetable {} ready", timetable_id),
            });
        }
    }

    /// Transition a pending job to `Failure`. Ignored once terminal.
    pub fn fail_job(&self, job_id: &str, error_message: impl Into<String>) {
        let mut jobs = self.jobs.write();
        if let Some(job) = jobs.get_mut(job_id) {
            if job.status.is_terminal() {
                return;
            }
            let message = error_message.into();
            job.status = JobStatus::Failure {
                error: message.clone(),
            };
            job.completed_at = Some(chrono::Utc::now());
            job.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level: LogLevel::Error,
                message,
            });
        }
    }

    /// Get a job by ID.
    pub fn get_job(&self, job_id: &str) -> Option<Job> {
        self.jobs.read().get(job_id).cloned()
    }

    /// Get all logs for a job.
    pub fn get_logs(&self, job_id: &str) -> Vec<LogEntry> {
        self.jobs
            .read()
            .get(job_id)
            .map(|job| job.logs.clone())
            .unwrap_or_default()
    }
}

impl Default for JobTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_is_pending() {
        let tracker = JobTracker::new();
        let id = tracker.create_job();
        let job = tracker.get_job(&id).unwrap();
        assert_eq!(job.status, JobStatus::Pending);
        assert!(job.completed_at.is_none());
    }

    #[test]
    fn test_success_transition() {
        let tracker = JobTracker::new();
        let id = tracker.create_job();
        tracker.succeed_job(&id, TimetableId::new(42));
        let job = tracker.get_job(&id).unwrap();
        assert_eq!(
            job.status,
            JobStatus::Success {
                timetable_id: TimetableId::new(42)
            }
        );
        assert!(job.completed_at.is_some());
    }

    #[test]
    fn test_terminal_jobs_are_frozen() {
        let tracker = JobTracker::new();
        let id = tracker.create_job();
        tracker.fail_job(&id, "engine unreachable");
        tracker.succeed_job(&id, TimetableId::new(1));
        let job = tracker.get_job(&id).unwrap();
        assert!(matches!(job.status, JobStatus::Failure { .. }));
    }

    #[test]
    fn test_logs_accumulate_in_order() {
        let tracker = JobTracker::new();
        let id = tracker.create_job();
        tracker.log(&id, LogLevel::Info, "submitted");
        tracker.log(&id, LogLevel::Warning, "engine slow");
        let logs = tracker.get_logs(&id);
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "submitted");
        assert_eq!(logs[1].message, "engine slow");
    }

    #[test]
    fn test_unknown_job() {
        let tracker = JobTracker::new();
        assert!(tracker.get_job("missing").is_none());
        assert!(tracker.get_logs("missing").is_empty());
        // Mutations on unknown ids are no-ops.
        tracker.fail_job("missing", "whatever");
    }

    #[test]
    fn test_status_serialization_shape() {
        let status = JobStatus::Success {
            timetable_id: TimetableId::new(3),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["state"], "success");
        assert_eq!(json["timetable_id"], 3);
    }
}
