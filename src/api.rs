//! Public API surface for the Rust backend.
//!
//! This file consolidates the identifier newtypes and DTO types for the
//! HTTP API. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::faculty::FacultyInfo;
pub use crate::routes::grid::{GridCell, GridData, GridEntry};
pub use crate::routes::landing::{DepartmentInfo, TimetableInfo};
pub use crate::routes::messages::MessageInfo;

use crate::define_id_type;

define_id_type!(i64, DepartmentId);
define_id_type!(i64, SubjectId);
define_id_type!(i64, FacultyId);
define_id_type!(i64, ClassroomId);
define_id_type!(i64, TimetableId);
define_id_type!(i64, ClassId);
define_id_type!(i64, MessageId);
define_id_type!(i64, UserId);

pub use crate::models::{ClockTime, DayOfWeek, ScheduledClass, TimeSlot};
