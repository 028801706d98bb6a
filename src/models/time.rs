use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week covered by the display grid.
///
/// The grid is six days wide (Monday through Saturday); Sunday is never
/// scheduled and has no column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// All grid days in display order.
    pub const ALL: [DayOfWeek; 6] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Display label matching the wire format.
    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }

    /// Parse a day label, case-insensitively.
    ///
    /// Returns `None` for anything that is not one of the six grid days.
    /// Callers treat `None` as "matches no grid column", never as an error.
    pub fn parse(label: &str) -> Option<DayOfWeek> {
        DayOfWeek::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Wall-clock time parsed from a zero-padded `HH:MM` or `HH:MM:SS` string.
///
/// Grid placement only ever consumes the integer hour; minutes and seconds
/// are retained for display but never distinguish cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
    second: u32,
}

impl ClockTime {
    /// Parse a `HH:MM[:SS]` string. Lenient: any malformed or out-of-range
    /// component yields `None` rather than an error, so a class carrying a
    /// bad time simply drops out of the grid.
    pub fn parse(s: &str) -> Option<ClockTime> {
        let mut parts = s.trim().split(':');
        let hour: u32 = parts.next()?.parse().ok()?;
        let minute: u32 = parts.next()?.parse().ok()?;
        let second: u32 = match parts.next() {
            Some(sec) => sec.parse().ok()?,
            None => 0,
        };
        if parts.next().is_some() {
            return None;
        }
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(ClockTime {
            hour,
            minute,
            second,
        })
    }

    /// Hour component, truncated. A class starting at 09:30 occupies the
    /// 09:00 cell; sub-hour precision is deliberately dropped.
    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}
