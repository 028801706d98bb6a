//! Roles and the capability check.
//!
//! All authorization branching in the HTTP layer funnels through
//! [`has_permission`]: one guarded region, one check. Handlers never match
//! on role strings directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
    Principal,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Admin => "admin",
            Role::Principal => "principal",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "faculty" => Ok(Role::Faculty),
            "admin" => Ok(Role::Admin),
            "principal" => Ok(Role::Principal),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// A guarded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// View timetables and projected grids.
    ViewTimetable,
    /// Submit generation jobs.
    GenerateTimetable,
    /// Add or edit faculty records.
    ManageFaculty,
    /// Send a message to the Principal.
    MessagePrincipal,
    /// Read the Principal's inbox.
    ReadMessages,
}

/// Single authorization decision point.
pub fn has_permission(role: Role, capability: Capability) -> bool {
    use Capability::*;
    match capability {
        ViewTimetable => true,
        GenerateTimetable | ManageFaculty => role == Role::Admin,
        MessagePrincipal => matches!(role, Role::Student | Role::Faculty | Role::Admin),
        ReadMessages => matches!(role, Role::Principal | Role::Admin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everyone_views_timetables() {
        for role in [Role::Student, Role::Faculty, Role::Admin, Role::Principal] {
            assert!(has_permission(role, Capability::ViewTimetable));
        }
    }

    #[test]
    fn test_only_admin_generates() {
        assert!(has_permission(Role::Admin, Capability::GenerateTimetable));
        assert!(!has_permission(Role::Student, Capability::GenerateTimetable));
        assert!(!has_permission(Role::Faculty, Capability::GenerateTimetable));
        assert!(!has_permission(Role::Principal, Capability::GenerateTimetable));
    }

    #[test]
    fn test_principal_does_not_message_itself() {
        assert!(!has_permission(Role::Principal, Capability::MessagePrincipal));
        assert!(has_permission(Role::Student, Capability::MessagePrincipal));
    }

    #[test]
    fn test_inbox_readers() {
        assert!(has_permission(Role::Principal, Capability::ReadMessages));
        assert!(has_permission(Role::Admin, Capability::ReadMessages));
        assert!(!has_permission(Role::Student, Capability::ReadMessages));
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Student, Role::Faculty, Role::Admin, Role::Principal] {
            assert_eq!(Role::from_str(role.label()).unwrap(), role);
        }
        assert!(Role::from_str("dean").is_err());
    }
}
