//! Conflict presentation for grid cells.
//!
//! The conflict id set is advisory input computed elsewhere (see
//! [`crate::services::conflict_detector`] or the caller-supplied query
//! parameter); this module only decides render styling per class.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::api::ClassId;

/// Render styling for one class inside a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellHighlight {
    Normal,
    Conflict,
}

/// Pure classification: a class id in the conflict set renders as a
/// conflict, everything else as normal.
pub fn highlight_for(id: ClassId, conflicts: &HashSet<ClassId>) -> CellHighlight {
    if conflicts.contains(&id) {
        CellHighlight::Conflict
    } else {
        CellHighlight::Normal
    }
}
