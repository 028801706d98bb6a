//! Data Transfer Objects for the HTTP API.
//!
//! Request/response shapes for the REST endpoints. Listing DTOs are
//! re-exported from the routes module since they already derive
//! Serialize/Deserialize.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Faculty
    FacultyInfo,
    // Grid
    GridCell,
    GridData,
    GridEntry,
    // Landing
    DepartmentInfo,
    MessageInfo,
    TimetableInfo,
};

use crate::auth::Role;

/// Request body for account registration. The department is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub department_id: i64,
}

/// Request body for login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Session details returned by register, login, and `me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub username: String,
    pub role: Role,
    pub department_id: i64,
}

/// Response for logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub revoked: bool,
}

/// Request body for submitting a generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub department_id: i64,
    /// Name for the generated timetable
    pub name: String,
}

/// Response for generation submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Job ID for tracking the async processing
    pub job_id: String,
    /// Message about the operation
    pub message: String,
}

/// Job status response for async processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub status: crate::services::job_tracker::JobStatus,
    pub logs: Vec<crate::services::job_tracker::LogEntry>,
}

/// Request body for adding a faculty member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyRequest {
    pub name: String,
    pub department_id: i64,
    #[serde(default)]
    pub designation: Option<String>,
}

/// Query parameters for the faculty listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FacultyQuery {
    #[serde(default)]
    pub department_id: Option<i64>,
}

/// Query parameters for the grid endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GridQuery {
    /// Comma-separated class ids to highlight as conflicts. When absent the
    /// server computes the conflict set itself.
    #[serde(default)]
    pub conflicts: Option<String>,
}

/// Request body for messaging the Principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub body: String,
}

/// Response after storing (and attempting to relay) a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message_id: i64,
    pub relayed: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository status
    pub repository: String,
}

/// Department list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentListResponse {
    pub departments: Vec<DepartmentInfo>,
    pub total: usize,
}

/// Faculty list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyListResponse {
    pub faculty: Vec<FacultyInfo>,
    pub total: usize,
}

/// Timetable list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableListResponse {
    pub timetables: Vec<TimetableInfo>,
    pub total: usize,
}

/// Message list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageInfo>,
    pub total: usize,
}
