// ============================================================================
// Timetable domain types
// ============================================================================
//
// These types mirror the JSON shapes produced by the generation backend:
// a timetable is an ordered list of scheduled classes, each carrying foreign
// ids for its subject, faculty member and classroom (with optional
// denormalized display names) plus an optional embedded time slot. Times
// travel as zero-padded `HH:MM[:SS]` strings and day names as labels; both
// are parsed leniently at the point of use.

use serde::{Deserialize, Serialize};

use crate::models::time::{ClockTime, DayOfWeek};

/// Day-of-week plus start/end time window for one scheduled class.
///
/// `day_of_week` and the two time fields are kept in wire form (strings).
/// A slot whose day or times do not parse simply never matches a grid cell;
/// nothing here validates `start_time < end_time`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlot {
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
}

impl TimeSlot {
    pub fn new(
        day_of_week: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            day_of_week: day_of_week.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Parsed grid day, if the label is one of the six grid days.
    pub fn day(&self) -> Option<DayOfWeek> {
        DayOfWeek::parse(&self.day_of_week)
    }

    /// Truncated start hour, if the start time parses.
    pub fn start_hour(&self) -> Option<u32> {
        ClockTime::parse(&self.start_time).map(|t| t.hour())
    }

    /// Truncated end hour, if the end time parses.
    pub fn end_hour(&self) -> Option<u32> {
        ClockTime::parse(&self.end_time).map(|t| t.hour())
    }
}

/// One timetable entry linking a subject, faculty member, classroom and an
/// optional time slot.
///
/// Constructed externally and treated as immutable for the duration of a
/// projection pass. A missing `timeslot_detail` means "no display data":
/// the class is excluded from every grid cell, which is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledClass {
    pub id: crate::api::ClassId,
    pub subject_id: crate::api::SubjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,
    pub faculty_id: crate::api::FacultyId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_name: Option<String>,
    pub classroom_id: crate::api::ClassroomId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classroom_name: Option<String>,
    /// Short descriptive label, e.g. "lecture" or "lab".
    #[serde(default)]
    pub class_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeslot_detail: Option<TimeSlot>,
}

impl ScheduledClass {
    /// Display name for the subject, falling back to the foreign id.
    pub fn subject_label(&self) -> String {
        self.subject_name
            .clone()
            .unwrap_or_else(|| format!("Subject {}", self.subject_id))
    }

    /// Display name for the faculty member, falling back to the foreign id.
    pub fn faculty_label(&self) -> String {
        self.faculty_name
            .clone()
            .unwrap_or_else(|| format!("Faculty {}", self.faculty_id))
    }

    /// Display name for the classroom, falling back to the foreign id.
    pub fn classroom_label(&self) -> String {
        self.classroom_name
            .clone()
            .unwrap_or_else(|| format!("Room {}", self.classroom_id))
    }
}

/// Parse a scheduled-class list from a JSON string.
///
/// Accepts either a bare array or a wrapper object `{"classes": [ ... ]}`.
pub fn parse_class_list(json: &str) -> anyhow::Result<Vec<ScheduledClass>> {
    use anyhow::Context;

    #[derive(Deserialize)]
    struct ClassesWrapper {
        classes: Vec<ScheduledClass>,
    }

    let trimmed = json.trim();
    if let Ok(wrapper) = serde_json::from_str::<ClassesWrapper>(trimmed) {
        return Ok(wrapper.classes);
    }
    serde_json::from_str::<Vec<ScheduledClass>>(trimmed)
        .context("Failed to deserialize scheduled-class list")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClassId, ClassroomId, FacultyId, SubjectId};

    fn sample_class(id: i64, slot: Option<TimeSlot>) -> ScheduledClass {
        ScheduledClass {
            id: ClassId::new(id),
            subject_id: SubjectId::new(10),
            subject_name: Some("Algorithms".to_string()),
            faculty_id: FacultyId::new(20),
            faculty_name: None,
            classroom_id: ClassroomId::new(30),
            classroom_name: Some("CS-101".to_string()),
            class_type: "lecture".to_string(),
            timeslot_detail: slot,
        }
    }

    #[test]
    fn test_slot_accessors() {
        let slot = TimeSlot::new("Monday", "09:30", "11:00");
        assert_eq!(slot.day(), Some(DayOfWeek::Monday));
        assert_eq!(slot.start_hour(), Some(9));
        assert_eq!(slot.end_hour(), Some(11));
    }

    #[test]
    fn test_slot_malformed_degrades() {
        let slot = TimeSlot::new("Someday", "9am", "noon");
        assert_eq!(slot.day(), None);
        assert_eq!(slot.start_hour(), None);
        assert_eq!(slot.end_hour(), None);
    }

    #[test]
    fn test_labels_fall_back_to_ids() {
        let class = sample_class(1, None);
        assert_eq!(class.subject_label(), "Algorithms");
        assert_eq!(class.faculty_label(), "Faculty 20");
        assert_eq!(class.classroom_label(), "CS-101");
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[
            {"id": 1, "subject_id": 10, "faculty_id": 20, "classroom_id": 30,
             "class_type": "lecture",
             "timeslot_detail": {"day_of_week": "Monday",
                                 "start_time": "09:00", "end_time": "10:00"}}
        ]"#;
        let classes = parse_class_list(json).unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].id.value(), 1);
        assert!(classes[0].timeslot_detail.is_some());
    }

    #[test]
    fn test_parse_wrapper_object() {
        let json = r#"{"classes": [
            {"id": 2, "subject_id": 10, "faculty_id": 20, "classroom_id": 30}
        ]}"#;
        let classes = parse_class_list(json).unwrap();
        assert_eq!(classes.len(), 1);
        assert!(classes[0].timeslot_detail.is_none());
        assert_eq!(classes[0].class_type, "");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_class_list("not json").is_err());
    }
}
