//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic. Guarded endpoints resolve the caller's
//! session from the bearer token and evaluate exactly one capability check.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::sse::{Event, Sse},
    Json,
};
use futures::stream::Stream;
use std::collections::HashSet;
use std::convert::Infallible;
use std::time::Duration;

use super::dto::{
    DepartmentListResponse, FacultyListResponse, FacultyQuery, FacultyRequest, GenerateRequest,
    GenerateResponse, GridQuery, HealthResponse, JobStatusResponse, LoginRequest, LogoutResponse,
    MessageListResponse, MessageRequest, MessageResponse, RegisterRequest, SessionResponse,
    TimetableListResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{ClassId, DepartmentId, FacultyId, GridData, MessageInfo, TimetableId, UserId};
use crate::auth::{self, Capability, Session};
use crate::db::models::{FacultyMember, PrincipalMessage, TimetableRecord, UserRecord};
use crate::db::repository::RepositoryError;
use crate::routes::landing::DepartmentInfo;
use crate::services::{conflict_detector, generation, grid_projector};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Auth plumbing
// =============================================================================

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Session, AppError> {
    let token = bearer_token(headers)
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;
    state
        .sessions
        .get(token)
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired session".to_string()))
}

fn authorize(session: &Session, capability: Capability) -> Result<(), AppError> {
    if auth::has_permission(session.role, capability) {
        return Ok(());
    }
    Err(AppError::Forbidden(format!(
        "Role '{}' may not perform this action",
        session.role
    )))
}

fn session_response(session: &Session) -> SessionResponse {
    SessionResponse {
        token: session.token.clone(),
        username: session.username.clone(),
        role: session.role,
        department_id: session.department_id.value(),
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the
/// repository is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository: repo_status,
    }))
}

// =============================================================================
// Auth
// =============================================================================

/// POST /v1/auth/register
///
/// Create an account. A valid department is mandatory; registration without
/// one is rejected up front.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    if request.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username must not be empty".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::BadRequest("Password must not be empty".to_string()));
    }

    let department_id = DepartmentId::new(request.department_id);
    let department = match state.repository.get_department(department_id).await {
        Ok(d) => d,
        Err(RepositoryError::NotFound { .. }) => {
            return Err(AppError::BadRequest(format!(
                "Unknown department {}",
                request.department_id
            )))
        }
        Err(e) => return Err(e.into()),
    };

    let salt = uuid::Uuid::new_v4().to_string();
    let user = UserRecord {
        id: UserId::new(0), // assigned by the repository
        username: request.username.trim().to_string(),
        password_digest: auth::hash_password(&salt, &request.password),
        password_salt: salt,
        role: request.role,
        department_id: department.id,
    };
    let user_id = state.repository.store_user(user).await?;

    let session = state.sessions.create(
        user_id,
        request.username.trim(),
        request.role,
        department.id,
    );
    Ok((StatusCode::CREATED, Json(session_response(&session))))
}

/// POST /v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> HandlerResult<SessionResponse> {
    let user = state
        .repository
        .find_user(&request.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    if !auth::verify_password(&user.password_salt, &request.password, &user.password_digest) {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let session = state
        .sessions
        .create(user.id, &user.username, user.role, user.department_id);
    Ok(Json(session_response(&session)))
}

/// POST /v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<LogoutResponse> {
    let revoked = bearer_token(&headers)
        .map(|token| state.sessions.revoke(token))
        .unwrap_or(false);
    Ok(Json(LogoutResponse { revoked }))
}

/// GET /v1/auth/me
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> HandlerResult<SessionResponse> {
    let session = require_session(&state, &headers)?;
    Ok(Json(session_response(&session)))
}

// =============================================================================
// Listings
// =============================================================================

/// GET /v1/departments
pub async fn list_departments(
    State(state): State<AppState>,
) -> HandlerResult<DepartmentListResponse> {
    let departments: Vec<DepartmentInfo> = state
        .repository
        .list_departments()
        .await?
        .into_iter()
        .map(|d| DepartmentInfo {
            department_id: d.id,
            name: d.name,
            code: d.code,
        })
        .collect();
    let total = departments.len();
    Ok(Json(DepartmentListResponse { departments, total }))
}

/// GET /v1/faculty
///
/// List faculty members, optionally filtered by department.
pub async fn list_faculty(
    State(state): State<AppState>,
    Query(query): Query<FacultyQuery>,
) -> HandlerResult<FacultyListResponse> {
    let department = query.department_id.map(DepartmentId::new);
    let faculty: Vec<crate::api::FacultyInfo> = state
        .repository
        .list_faculty(department)
        .await?
        .into_iter()
        .map(|m| crate::api::FacultyInfo {
            faculty_id: m.id,
            name: m.name,
            department_id: m.department_id,
            designation: m.designation,
        })
        .collect();
    let total = faculty.len();
    Ok(Json(FacultyListResponse { faculty, total }))
}

/// POST /v1/faculty
///
/// Add a faculty member to a department; requires the ManageFaculty
/// capability.
pub async fn create_faculty(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<FacultyRequest>,
) -> Result<(StatusCode, Json<crate::api::FacultyInfo>), AppError> {
    let session = require_session(&state, &headers)?;
    authorize(&session, Capability::ManageFaculty)?;

    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("Faculty name must not be empty".to_string()));
    }
    let department = match state
        .repository
        .get_department(DepartmentId::new(request.department_id))
        .await
    {
        Ok(d) => d,
        Err(RepositoryError::NotFound { .. }) => {
            return Err(AppError::BadRequest(format!(
                "Unknown department {}",
                request.department_id
            )))
        }
        Err(e) => return Err(e.into()),
    };

    let member = FacultyMember {
        id: FacultyId::new(0), // assigned by the repository
        name: request.name.trim().to_string(),
        department_id: department.id,
        designation: request.designation,
    };
    let id = state.repository.store_faculty(member).await?;
    let stored = state.repository.get_faculty(id).await?;

    Ok((
        StatusCode::CREATED,
        Json(crate::api::FacultyInfo {
            faculty_id: stored.id,
            name: stored.name,
            department_id: stored.department_id,
            designation: stored.designation,
        }),
    ))
}

/// GET /v1/timetables
pub async fn list_timetables(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<TimetableListResponse> {
    let session = require_session(&state, &headers)?;
    authorize(&session, Capability::ViewTimetable)?;

    let timetables = state.repository.list_timetables().await?;
    let total = timetables.len();
    Ok(Json(TimetableListResponse { timetables, total }))
}

/// GET /v1/timetables/{timetable_id}
pub async fn get_timetable(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(timetable_id): Path<i64>,
) -> HandlerResult<TimetableRecord> {
    let session = require_session(&state, &headers)?;
    authorize(&session, Capability::ViewTimetable)?;

    let record = state
        .repository
        .get_timetable(TimetableId::new(timetable_id))
        .await?;
    Ok(Json(record))
}

// =============================================================================
// Grid projection
// =============================================================================

/// Parse a comma-separated conflict id list. Non-numeric entries are
/// dropped silently; an unparseable set degrades to fewer highlights, not
/// an error.
fn parse_conflict_ids(raw: &str) -> HashSet<ClassId> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .map(ClassId::new)
        .collect()
}

/// GET /v1/timetables/{timetable_id}/grid
///
/// Project a timetable onto the fixed day x hour grid. The caller may
/// supply the conflict set (`?conflicts=1,2`); otherwise the server detects
/// resource conflicts itself.
pub async fn get_timetable_grid(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(timetable_id): Path<i64>,
    Query(query): Query<GridQuery>,
) -> HandlerResult<GridData> {
    let session = require_session(&state, &headers)?;
    authorize(&session, Capability::ViewTimetable)?;

    let record = state
        .repository
        .get_timetable(TimetableId::new(timetable_id))
        .await?;

    let conflicts = match &query.conflicts {
        Some(raw) => parse_conflict_ids(raw),
        None => conflict_detector::detect_conflicts(&record.classes),
    };

    Ok(Json(grid_projector::project(
        record.id,
        &record.classes,
        &conflicts,
    )))
}

// =============================================================================
// Generation jobs
// =============================================================================

/// POST /v1/timetables/generate
///
/// Submit a generation job to the engine. Returns 202 with a job ID for
/// tracking progress; requires the GenerateTimetable capability.
pub async fn generate_timetable(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<GenerateResponse>), AppError> {
    let session = require_session(&state, &headers)?;
    authorize(&session, Capability::GenerateTimetable)?;

    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("Timetable name must not be empty".to_string()));
    }

    let job_id = state.job_tracker.create_job();
    let response_job_id = job_id.clone();

    let tracker = state.job_tracker.clone();
    let engine = state.engine.clone();
    let poll_interval = state.engine_poll_interval;
    let generation_request = generation::GenerationRequest {
        department_id: DepartmentId::new(request.department_id),
        name: request.name.trim().to_string(),
    };

    tokio::spawn(async move {
        generation::run_generation(job_id, tracker, engine, generation_request, poll_interval)
            .await;
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(GenerateResponse {
            job_id: response_job_id.clone(),
            message: format!(
                "Generation started. Track progress at /v1/jobs/{}/logs",
                response_job_id
            ),
        }),
    ))
}

/// GET /v1/jobs/{job_id}
///
/// Get the current status and logs of a generation job.
pub async fn get_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> HandlerResult<JobStatusResponse> {
    let job = state
        .job_tracker
        .get_job(&job_id)
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;

    Ok(Json(JobStatusResponse {
        job_id: job.job_id,
        status: job.status,
        logs: job.logs,
    }))
}

/// GET /v1/jobs/{job_id}/logs
///
/// Stream job logs via Server-Sent Events (SSE).
pub async fn stream_job_logs(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    // Verify job exists before opening the stream
    if state.job_tracker.get_job(&job_id).is_none() {
        return Err(AppError::NotFound(format!("Job {} not found", job_id)));
    }

    let tracker = state.job_tracker.clone();
    let stream = async_stream::stream! {
        let mut last_log_count = 0;
        loop {
            let logs = tracker.get_logs(&job_id);
            for log in logs.iter().skip(last_log_count) {
                let event_data = serde_json::to_string(log).unwrap_or_default();
                yield Ok(Event::default().data(event_data));
            }
            last_log_count = logs.len();

            match tracker.get_job(&job_id) {
                Some(job) if job.status.is_terminal() => {
                    let final_event = serde_json::json!({ "status": job.status });
                    yield Ok(Event::default()
                        .event("complete")
                        .data(serde_json::to_string(&final_event).unwrap_or_default()));
                    break;
                }
                Some(_) => {}
                None => break,
            }

            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    };

    Ok(Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive"),
    ))
}

// =============================================================================
// Messages to the Principal
// =============================================================================

fn message_info(message: PrincipalMessage) -> MessageInfo {
    MessageInfo {
        message_id: message.id,
        sender: message.sender,
        sender_role: message.sender_role,
        body: message.body,
        created_at: message.created_at,
        relayed: message.relayed,
    }
}

/// POST /v1/messages
///
/// Store a message for the Principal and attempt to relay it. Relay
/// failure is logged and reflected in `relayed`, never surfaced as an
/// error: the message is already stored.
pub async fn post_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<MessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let session = require_session(&state, &headers)?;
    authorize(&session, Capability::MessagePrincipal)?;

    if request.body.trim().is_empty() {
        return Err(AppError::BadRequest("Message body must not be empty".to_string()));
    }

    let mut message = PrincipalMessage {
        id: crate::api::MessageId::new(0), // assigned by the repository
        sender: session.username.clone(),
        sender_role: session.role.label().to_string(),
        body: request.body.trim().to_string(),
        created_at: chrono::Utc::now(),
        relayed: false,
    };
    let message_id = state.repository.store_message(message.clone()).await?;
    message.id = message_id;

    let relayed = match state.notifier.relay(&message).await {
        Ok(true) => {
            state.repository.mark_message_relayed(message_id).await?;
            true
        }
        Ok(false) => false,
        Err(e) => {
            tracing::warn!(message_id = %message_id, error = %e, "message relay failed");
            false
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message_id: message_id.value(),
            relayed,
        }),
    ))
}

/// GET /v1/messages
///
/// The Principal's inbox; requires the ReadMessages capability.
pub async fn list_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<MessageListResponse> {
    let session = require_session(&state, &headers)?;
    authorize(&session, Capability::ReadMessages)?;

    let messages: Vec<MessageInfo> = state
        .repository
        .list_messages()
        .await?
        .into_iter()
        .map(message_info)
        .collect();
    let total = messages.len();
    Ok(Json(MessageListResponse { messages, total }))
}
