//! Grid projection for timetable rendering.
//!
//! Maps an ordered list of scheduled classes onto the fixed day x hour
//! display grid. The grid shape is configuration, not data: six days
//! (Monday through Saturday) by ten start hours (08:00 through 17:00).
//!
//! Placement is coarse by policy: only the truncated hour of a slot's start
//! and end times matters, and a class occupies every cell whose hour falls
//! in the half-open interval `[start_hour, end_hour)`. A class starting at
//! 09:30 therefore already occupies the 09:00 cell and nothing past its
//! truncated end hour. Malformed or missing slot data excludes a class from
//! every cell; no input ever makes projection fail.

use std::collections::HashSet;

use crate::api::{ClassId, GridCell, GridData, GridEntry, TimetableId};
use crate::models::{DayOfWeek, ScheduledClass};
use crate::services::conflict_view;

/// First start hour of the grid (08:00).
pub const GRID_START_HOUR: u32 = 8;

/// Last start hour of the grid, inclusive (17:00).
pub const GRID_END_HOUR: u32 = 17;

/// All start hours in display order.
pub fn grid_hours() -> impl Iterator<Item = u32> {
    GRID_START_HOUR..=GRID_END_HOUR
}

/// Classes occupying the cell at (`day`, `hour`), in input order.
///
/// A class matches when its slot is present, its day label parses to `day`,
/// and `hour` lies in `[start_hour, end_hour)` after hour truncation. A slot
/// with `start == end` (or `end < start`) matches nothing; there is no
/// wraparound. Pure and recomputed from scratch per call: the grid is 60
/// cells and a timetable is tens of classes, so O(cells x classes) is fine.
pub fn cell_classes<'a>(
    classes: &'a [ScheduledClass],
    day: DayOfWeek,
    hour: u32,
) -> Vec<&'a ScheduledClass> {
    classes
        .iter()
        .filter(|class| {
            let Some(slot) = &class.timeslot_detail else {
                return false;
            };
            if slot.day() != Some(day) {
                return false;
            }
            match (slot.start_hour(), slot.end_hour()) {
                (Some(start), Some(end)) => start <= hour && hour < end,
                _ => false,
            }
        })
        .collect()
}

/// Project a full timetable onto the display grid, applying the supplied
/// conflict id set to decide per-entry highlighting.
///
/// Cells are emitted row-major: every day for hour 8, then hour 9, and so
/// on, matching the order the frontend renders rows in.
pub fn project(
    timetable_id: TimetableId,
    classes: &[ScheduledClass],
    conflicts: &HashSet<ClassId>,
) -> GridData {
    let mut cells = Vec::with_capacity(DayOfWeek::ALL.len() * 10);
    for hour in grid_hours() {
        for day in DayOfWeek::ALL {
            let entries = cell_classes(classes, day, hour)
                .into_iter()
                .map(|class| GridEntry {
                    class_id: class.id,
                    subject: class.subject_label(),
                    faculty: class.faculty_label(),
                    classroom: class.classroom_label(),
                    class_type: class.class_type.clone(),
                    highlight: conflict_view::highlight_for(class.id, conflicts),
                })
                .collect();
            cells.push(GridCell {
                day: day.label().to_string(),
                hour,
                entries,
            });
        }
    }

    let mut conflict_ids: Vec<i64> = conflicts.iter().map(|id| id.value()).collect();
    conflict_ids.sort_unstable();

    GridData {
        timetable_id,
        days: DayOfWeek::ALL.iter().map(|d| d.label().to_string()).collect(),
        hours: grid_hours().collect(),
        cells,
        conflict_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClassroomId, FacultyId, SubjectId};
    use crate::models::TimeSlot;

    fn class_with_slot(id: i64, day: &str, start: &str, end: &str) -> ScheduledClass {
        ScheduledClass {
            id: ClassId::new(id),
            subject_id: SubjectId::new(id * 10),
            subject_name: None,
            faculty_id: FacultyId::new(id * 100),
            faculty_name: None,
            classroom_id: ClassroomId::new(1),
            classroom_name: None,
            class_type: "lecture".to_string(),
            timeslot_detail: Some(TimeSlot::new(day, start, end)),
        }
    }

    fn slotless_class(id: i64) -> ScheduledClass {
        let mut class = class_with_slot(id, "Monday", "09:00", "10:00");
        class.timeslot_detail = None;
        class
    }

    fn occupied_cells(classes: &[ScheduledClass], id: i64) -> Vec<(DayOfWeek, u32)> {
        let mut cells = vec![];
        for day in DayOfWeek::ALL {
            for hour in grid_hours() {
                if cell_classes(classes, day, hour)
                    .iter()
                    .any(|c| c.id.value() == id)
                {
                    cells.push((day, hour));
                }
            }
        }
        cells
    }

    #[test]
    fn test_two_hour_class_occupies_both_cells() {
        let classes = vec![class_with_slot(1, "Monday", "09:00", "11:00")];
        assert_eq!(
            occupied_cells(&classes, 1),
            vec![(DayOfWeek::Monday, 9), (DayOfWeek::Monday, 10)]
        );
    }

    #[test]
    fn test_hour_truncation_policy() {
        // 09:30-10:30 is treated as [9, 10): the 09:00 cell only.
        let classes = vec![class_with_slot(1, "Wednesday", "09:30", "10:30")];
        assert_eq!(occupied_cells(&classes, 1), vec![(DayOfWeek::Wednesday, 9)]);
    }

    #[test]
    fn test_missing_slot_occupies_nothing() {
        let classes = vec![slotless_class(1)];
        assert!(occupied_cells(&classes, 1).is_empty());
    }

    #[test]
    fn test_zero_length_slot_occupies_nothing() {
        let classes = vec![class_with_slot(1, "Tuesday", "09:00", "09:00")];
        assert!(occupied_cells(&classes, 1).is_empty());
    }

    #[test]
    fn test_inverted_slot_occupies_nothing() {
        let classes = vec![class_with_slot(1, "Tuesday", "11:00", "09:00")];
        assert!(occupied_cells(&classes, 1).is_empty());
    }

    #[test]
    fn test_out_of_range_hours_never_match() {
        let classes = vec![class_with_slot(1, "Monday", "06:00", "07:00")];
        assert!(occupied_cells(&classes, 1).is_empty());
    }

    #[test]
    fn test_unknown_day_never_matches() {
        let classes = vec![class_with_slot(1, "Sunday", "09:00", "10:00")];
        assert!(occupied_cells(&classes, 1).is_empty());
    }

    #[test]
    fn test_overlapping_classes_preserve_input_order() {
        let classes = vec![
            class_with_slot(2, "Tuesday", "14:00", "15:00"),
            class_with_slot(1, "Tuesday", "14:00", "16:00"),
        ];
        let cell = cell_classes(&classes, DayOfWeek::Tuesday, 14);
        let ids: Vec<i64> = cell.iter().map(|c| c.id.value()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_project_shape() {
        let classes = vec![class_with_slot(1, "Monday", "08:00", "09:00")];
        let data = project(TimetableId::new(5), &classes, &HashSet::new());
        assert_eq!(data.days.len(), 6);
        assert_eq!(data.hours, (8..=17).collect::<Vec<u32>>());
        assert_eq!(data.cells.len(), 60);
        // Row-major: the first cell is (Monday, 8).
        assert_eq!(data.cells[0].day, "Monday");
        assert_eq!(data.cells[0].hour, 8);
        assert_eq!(data.cells[0].entries.len(), 1);
    }

    #[test]
    fn test_project_applies_conflict_set() {
        let classes = vec![
            class_with_slot(1, "Tuesday", "14:00", "15:00"),
            class_with_slot(2, "Tuesday", "14:00", "15:00"),
        ];
        let conflicts: HashSet<ClassId> = [ClassId::new(1)].into_iter().collect();
        let data = project(TimetableId::new(5), &classes, &conflicts);

        let cell = data
            .cells
            .iter()
            .find(|c| c.day == "Tuesday" && c.hour == 14)
            .unwrap();
        assert_eq!(cell.entries.len(), 2);
        assert_eq!(
            cell.entries[0].highlight,
            crate::services::conflict_view::CellHighlight::Conflict
        );
        assert_eq!(
            cell.entries[1].highlight,
            crate::services::conflict_view::CellHighlight::Normal
        );
        assert_eq!(data.conflict_ids, vec![1]);
    }
}
