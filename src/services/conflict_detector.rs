//! Conflict detection over a scheduled-class list.
//!
//! Produces the conflict id set the presentation layer consumes when the
//! caller does not supply one. Detection runs upstream of the grid
//! projector and uses the same coarse truncated-hour intervals, so a
//! detected conflict is always visible as a shared cell in the grid.
//!
//! Two classes conflict when they share a faculty member or a classroom,
//! fall on the same grid day, and their `[start_hour, end_hour)` intervals
//! overlap. Classes without a usable slot can never conflict.

use std::collections::HashSet;

use crate::api::ClassId;
use crate::models::{DayOfWeek, ScheduledClass};

struct Placement {
    id: ClassId,
    faculty: i64,
    classroom: i64,
    day: DayOfWeek,
    start: u32,
    end: u32,
}

fn placement(class: &ScheduledClass) -> Option<Placement> {
    let slot = class.timeslot_detail.as_ref()?;
    let day = slot.day()?;
    let start = slot.start_hour()?;
    let end = slot.end_hour()?;
    if start >= end {
        return None;
    }
    Some(Placement {
        id: class.id,
        faculty: class.faculty_id.value(),
        classroom: class.classroom_id.value(),
        day,
        start,
        end,
    })
}

/// Ids of all classes involved in at least one resource conflict.
pub fn detect_conflicts(classes: &[ScheduledClass]) -> HashSet<ClassId> {
    let placements: Vec<Placement> = classes.iter().filter_map(placement).collect();

    let mut conflicts = HashSet::new();
    for (i, a) in placements.iter().enumerate() {
        for b in &placements[i + 1..] {
            if a.day != b.day {
                continue;
            }
            let shares_resource = a.faculty == b.faculty || a.classroom == b.classroom;
            let overlaps = a.start < b.end && b.start < a.end;
            if shares_resource && overlaps {
                conflicts.insert(a.id);
                conflicts.insert(b.id);
            }
        }
    }
    conflicts
}
