//! Repository implementations module.
//!
//! Currently a single implementation: `local`, the in-memory store used for
//! development and tests. The `TimetableRepository` trait seam is what a
//! database-backed implementation would plug into.
pub mod local;

pub use local::LocalRepository;
