//! Factory for creating repository instances.

use std::str::FromStr;
use std::sync::Arc;

use crate::db::repositories::LocalRepository;
use crate::db::repository::TimetableRepository;

/// Selectable repository backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory store, seeded with demo data.
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" | "memory" => Ok(RepositoryType::Local),
            other => Err(format!("Unknown repository type: {}", other)),
        }
    }
}

/// Factory for repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create the in-memory repository with seed data.
    pub fn create_local() -> Arc<dyn TimetableRepository> {
        Arc::new(LocalRepository::with_seed_data())
    }

    /// Create an empty in-memory repository (tests).
    pub fn create_local_empty() -> Arc<dyn TimetableRepository> {
        Arc::new(LocalRepository::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_type_parse() {
        assert_eq!(RepositoryType::from_str("local").unwrap(), RepositoryType::Local);
        assert_eq!(RepositoryType::from_str("Memory").unwrap(), RepositoryType::Local);
        assert!(RepositoryType::from_str("postgres").is_err());
    }
}
