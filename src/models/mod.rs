pub mod macros;
pub mod time;
pub mod timetable;

pub use time::*;
pub use timetable::*;
