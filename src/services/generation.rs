//! Generation-engine boundary and the poll loop.
//!
//! The timetable-generation algorithm is an external service; this module
//! only owns the boundary. [`GenerationEngine`] is the submit/poll contract,
//! [`run_generation`] drives a tracked job through it, and two
//! implementations exist: an in-process stand-in for development and tests,
//! and a reqwest client for a real remote engine.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::{DepartmentId, TimetableId};
use crate::db::models::TimetableRecord;
use crate::db::repository::TimetableRepository;
use crate::models::{DayOfWeek, ScheduledClass, TimeSlot};
use crate::services::grid_projector::{GRID_END_HOUR, GRID_START_HOUR};
use crate::services::job_tracker::{JobTracker, LogLevel};

/// Request submitted to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub department_id: DepartmentId,
    pub name: String,
}

/// Status reported by one engine poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineStatus {
    Pending,
    Success { timetable_id: TimetableId },
    Failure { error: String },
}

/// Submit/poll contract with the external generation engine.
#[async_trait]
pub trait GenerationEngine: Send + Sync {
    /// Submit a generation request; returns the engine's job reference.
    async fn submit(&self, request: &GenerationRequest) -> anyhow::Result<String>;

    /// Poll the engine for the status of a previously submitted job.
    async fn poll(&self, job_ref: &str) -> anyhow::Result<EngineStatus>;
}

/// Drive one tracked job through the engine: submit, then poll until a
/// terminal status arrives. Tracker transitions happen only here, and only
/// in response to poll results (or a submit/poll transport failure).
pub async fn run_generation(
    job_id: String,
    tracker: JobTracker,
    engine: Arc<dyn GenerationEngine>,
    request: GenerationRequest,
    poll_interval: Duration,
) {
    tracker.log(
        &job_id,
        LogLevel::Info,
        format!("Submitting generation request for department {}", request.department_id),
    );

    let job_ref = match engine.submit(&request).await {
        Ok(job_ref) => job_ref,
        Err(e) => {
            warn!(job_id = %job_id, error = %e, "engine submit failed");
            tracker.fail_job(&job_id, format!("Engine submit failed: {}", e));
            return;
        }
    };
    tracker.log(&job_id, LogLevel::Info, format!("Engine accepted job {}", job_ref));

    loop {
        match engine.poll(&job_ref).await {
            Ok(EngineStatus::Pending) => {
                tokio::time::sleep(poll_interval).await;
            }
            Ok(EngineStatus::Success { timetable_id }) => {
                info!(job_id = %job_id, timetable_id = %timetable_id, "generation succeeded");
                tracker.succeed_job(&job_id, timetable_id);
                return;
            }
            Ok(EngineStatus::Failure { error }) => {
                tracker.fail_job(&job_id, error);
                return;
            }
            Err(e) => {
                warn!(job_id = %job_id, error = %e, "engine poll failed");
                tracker.fail_job(&job_id, format!("Engine poll failed: {}", e));
                return;
            }
        }
    }
}

// ============================================================================
// In-process engine
// ============================================================================

/// In-process stand-in for the external engine.
///
/// Performs a trivial assignment instead of real optimization: subjects of
/// the requested department are laid out left to right across the grid,
/// faculty and classrooms assigned round-robin. Good enough to light up
/// every downstream feature (grid, conflicts, jobs) without the engine.
pub struct LocalEngine {
    repository: Arc<dyn TimetableRepository>,
    results: RwLock<HashMap<String, EngineStatus>>,
}

impl LocalEngine {
    pub fn new(repository: Arc<dyn TimetableRepository>) -> Self {
        Self {
            repository,
            results: RwLock::new(HashMap::new()),
        }
    }

    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<TimetableId> {
        let department = self
            .repository
            .get_department(request.department_id)
            .await?;
        let subjects = self.repository.list_subjects(department.id).await?;
        let faculty = self.repository.list_faculty(Some(department.id)).await?;
        let classrooms = self.repository.list_classrooms().await?;

        if subjects.is_empty() {
            anyhow::bail!("Department {} has no subjects to schedule", department.code);
        }
        if faculty.is_empty() || classrooms.is_empty() {
            anyhow::bail!(
                "Department {} needs at least one faculty member and one classroom",
                department.code
            );
        }

        let hours_per_day = (GRID_END_HOUR - GRID_START_HOUR + 1) as usize;
        let mut classes = Vec::with_capacity(subjects.len());
        for (i, subject) in subjects.iter().enumerate() {
            let day = DayOfWeek::ALL[i / hours_per_day % DayOfWeek::ALL.len()];
            let hour = GRID_START_HOUR + (i % hours_per_day) as u32;
            let teacher = &faculty[i % faculty.len()];
            let room = &classrooms[i % classrooms.len()];
            classes.push(ScheduledClass {
                id: crate::api::ClassId::new(i as i64 + 1),
                subject_id: subject.id,
                subject_name: Some(subject.name.clone()),
                faculty_id: teacher.id,
                faculty_name: Some(teacher.name.clone()),
                classroom_id: room.id,
                classroom_name: Some(room.name.clone()),
                class_type: "lecture".to_string(),
                timeslot_detail: Some(TimeSlot::new(
                    day.label(),
                    format!("{:02}:00", hour),
                    format!("{:02}:00", hour + 1),
                )),
            });
        }

        let record = TimetableRecord {
            id: TimetableId::new(0), // assigned by the repository
            name: request.name.clone(),
            department_id: department.id,
            classes,
            created_at: chrono::Utc::now(),
        };
        Ok(self.repository.store_timetable(record).await?)
    }
}

#[async_trait]
impl GenerationEngine for LocalEngine {
    async fn submit(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        let job_ref = uuid::Uuid::new_v4().to_string();
        let status = match self.generate(request).await {
            Ok(timetable_id) => EngineStatus::Success { timetable_id },
            Err(e) => EngineStatus::Failure {
                error: e.to_string(),
            },
        };
        self.results.write().insert(job_ref.clone(), status);
        Ok(job_ref)
    }

    async fn poll(&self, job_ref: &str) -> anyhow::Result<EngineStatus> {
        self.results
            .read()
            .get(job_ref)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Unknown engine job reference: {}", job_ref))
    }
}

// ============================================================================
// Remote engine (HTTP)
// ============================================================================

#[derive(Debug, Serialize)]
struct RemoteSubmitBody<'a> {
    department_id: i64,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct RemoteSubmitResponse {
    task_id: String,
}

#[derive(Debug, Deserialize)]
struct RemoteStatusResponse {
    status: String,
    #[serde(default)]
    timetable_id: Option<i64>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for a remote generation engine.
///
/// Speaks the engine's Celery-style status strings: `SUCCESS` and `FAILURE`
/// are terminal; anything else (`PENDING`, `STARTED`, `RETRY`) counts as
/// still pending.
pub struct HttpEngine {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEngine {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl GenerationEngine for HttpEngine {
    async fn submit(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        let url = format!("{}/api/timetables/generate/", self.base_url.trim_end_matches('/'));
        let body = RemoteSubmitBody {
            department_id: request.department_id.value(),
            name: &request.name,
        };
        let response: RemoteSubmitResponse = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.task_id)
    }

    async fn poll(&self, job_ref: &str) -> anyhow::Result<EngineStatus> {
        let url = format!(
            "{}/api/timetables/status/{}/",
            self.base_url.trim_end_matches('/'),
            job_ref
        );
        let response: RemoteStatusResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match response.status.to_ascii_uppercase().as_str() {
            "SUCCESS" => {
                let id = response
                    .timetable_id
                    .ok_or_else(|| anyhow::anyhow!("Engine reported SUCCESS without a timetable id"))?;
                Ok(EngineStatus::Success {
                    timetable_id: TimetableId::new(id),
                })
            }
            "FAILURE" => Ok(EngineStatus::Failure {
                error: response
                    .error
                    .unwrap_or_else(|| "Engine reported failure without detail".to_string()),
            }),
            _ => Ok(EngineStatus::Pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;
    use crate::services::job_tracker::JobStatus;

    #[tokio::test]
    async fn test_local_engine_generates_timetable() {
        let repo: Arc<dyn TimetableRepository> = Arc::new(LocalRepository::with_seed_data());
        let engine = LocalEngine::new(repo.clone());
        let request = GenerationRequest {
            department_id: DepartmentId::new(1),
            name: "CSE Semester 5".to_string(),
        };

        let job_ref = engine.submit(&request).await.unwrap();
        let status = engine.poll(&job_ref).await.unwrap();
        let EngineStatus::Success { timetable_id } = status else {
            panic!("expected success, got {:?}", status);
        };

        let record = repo.get_timetable(timetable_id).await.unwrap();
        assert_eq!(record.name, "CSE Semester 5");
        // Seed data has three CSE subjects; each gets one slot.
        assert_eq!(record.classes.len(), 3);
        assert!(record.classes.iter().all(|c| c.timeslot_detail.is_some()));
    }

    #[tokio::test]
    async fn test_local_engine_unknown_department_fails() {
        let repo: Arc<dyn TimetableRepository> = Arc::new(LocalRepository::with_seed_data());
        let engine = LocalEngine::new(repo);
        let request = GenerationRequest {
            department_id: DepartmentId::new(999),
            name: "nope".to_string(),
        };

        let job_ref = engine.submit(&request).await.unwrap();
        assert!(matches!(
            engine.poll(&job_ref).await.unwrap(),
            EngineStatus::Failure { .. }
        ));
    }

    #[tokio::test]
    async fn test_run_generation_drives_tracker_to_success() {
        let repo: Arc<dyn TimetableRepository> = Arc::new(LocalRepository::with_seed_data());
        let engine: Arc<dyn GenerationEngine> = Arc::new(LocalEngine::new(repo));
        let tracker = JobTracker::new();
        let job_id = tracker.create_job();

        run_generation(
            job_id.clone(),
            tracker.clone(),
            engine,
            GenerationRequest {
                department_id: DepartmentId::new(1),
                name: "tt".to_string(),
            },
            Duration::from_millis(1),
        )
        .await;

        let job = tracker.get_job(&job_id).unwrap();
        assert!(matches!(job.status, JobStatus::Success { .. }));
        assert!(!job.logs.is_empty());
    }

    #[tokio::test]
    async fn test_run_generation_surfaces_engine_failure() {
        let repo: Arc<dyn TimetableRepository> = Arc::new(LocalRepository::with_seed_data());
        let engine: Arc<dyn GenerationEngine> = Arc::new(LocalEngine::new(repo));
        let tracker = JobTracker::new();
        let job_id = tracker.create_job();

        run_generation(
            job_id.clone(),
            tracker.clone(),
            engine,
            GenerationRequest {
                department_id: DepartmentId::new(999),
                name: "tt".to_string(),
            },
            Duration::from_millis(1),
        )
        .await;

        let job = tracker.get_job(&job_id).unwrap();
        assert!(matches!(job.status, JobStatus::Failure { .. }));
    }
}
