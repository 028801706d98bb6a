//! Business logic services.
//!
//! The grid projector and its two conflict companions are pure functions;
//! the job tracker, generation boundary and notifier carry the service's
//! only shared state and I/O.

pub mod conflict_detector;
pub mod conflict_view;
pub mod generation;
pub mod grid_projector;
pub mod job_tracker;
pub mod notifier;

pub use conflict_detector::detect_conflicts;
pub use conflict_view::{highlight_for, CellHighlight};
pub use generation::{
    EngineStatus, GenerationEngine, GenerationRequest, HttpEngine, LocalEngine, run_generation,
};
pub use grid_projector::{cell_classes, grid_hours, project, GRID_END_HOUR, GRID_START_HOUR};
pub use job_tracker::{Job, JobStatus, JobTracker, LogEntry, LogLevel};
pub use notifier::{Notifier, NullNotifier, TelegramNotifier};
