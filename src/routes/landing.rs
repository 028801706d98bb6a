use crate::api::{DepartmentId, TimetableId};
use serde::{Deserialize, Serialize};

/// Lightweight timetable listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableInfo {
    pub timetable_id: TimetableId,
    pub timetable_name: String,
    pub department_id: DepartmentId,
}

/// Lightweight department listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentInfo {
    pub department_id: DepartmentId,
    pub name: String,
    pub code: String,
}
