use crate::api::{DepartmentId, FacultyId};
use serde::{Deserialize, Serialize};

/// Faculty listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyInfo {
    pub faculty_id: FacultyId,
    pub name: String,
    pub department_id: DepartmentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
}
