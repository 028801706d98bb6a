//! Stored entity records for the repository layer.

use serde::{Deserialize, Serialize};

use crate::api::{
    ClassroomId, DepartmentId, FacultyId, MessageId, SubjectId, TimetableId, UserId,
};
use crate::auth::Role;
use crate::models::ScheduledClass;

/// An academic department. Every user and timetable belongs to exactly one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub code: String,
}

/// A taught subject, owned by a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub code: String,
    pub department_id: DepartmentId,
}

/// A faculty member, owned by a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyMember {
    pub id: FacultyId,
    pub name: String,
    pub department_id: DepartmentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
}

/// A bookable room. Rooms are shared across departments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub id: ClassroomId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

/// A stored timetable: a named, ordered collection of scheduled classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableRecord {
    pub id: TimetableId,
    pub name: String,
    pub department_id: DepartmentId,
    pub classes: Vec<ScheduledClass>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A message addressed to the Principal role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalMessage {
    pub id: MessageId,
    pub sender: String,
    pub sender_role: String,
    pub body: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub relayed: bool,
}

/// A registered account. `password_digest` is a salted sha256 hex digest;
/// plaintext passwords are never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub password_salt: String,
    pub password_digest: String,
    pub role: Role,
    pub department_id: DepartmentId,
}
