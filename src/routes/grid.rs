use serde::{Deserialize, Serialize};

use crate::services::conflict_view::CellHighlight;

// =========================================================
// Grid projection types
// =========================================================

/// One class as rendered inside a grid cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridEntry {
    pub class_id: crate::api::ClassId,
    pub subject: String,
    pub faculty: String,
    pub classroom: String,
    pub class_type: String,
    pub highlight: CellHighlight,
}

/// One (day, hour) coordinate of the display grid with its occupants.
///
/// `entries` preserves the input order of the projected class list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridCell {
    pub day: String,
    pub hour: u32,
    pub entries: Vec<GridEntry>,
}

/// Complete projected grid for one timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridData {
    pub timetable_id: crate::api::TimetableId,
    /// Day labels in display order (6 columns).
    pub days: Vec<String>,
    /// Start hours in display order (10 rows, 08:00 through 17:00).
    pub hours: Vec<u32>,
    /// Every cell, row-major: all days for hour 8, then hour 9, and so on.
    pub cells: Vec<GridCell>,
    /// The conflict id set that was applied while projecting.
    pub conflict_ids: Vec<i64>,
}
