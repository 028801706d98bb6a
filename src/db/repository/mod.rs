//! Repository trait for timetable data storage.
//!
//! The trait is the seam between business logic and persistence: handlers
//! and services only ever see `Arc<dyn TimetableRepository>`. The in-memory
//! implementation lives in [`crate::db::repositories::local`].

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::{DepartmentId, FacultyId, MessageId, TimetableId, UserId};
use crate::db::models::{
    Classroom, Department, FacultyMember, PrincipalMessage, Subject, TimetableRecord, UserRecord,
};
use crate::routes::landing::TimetableInfo;

/// Abstract storage interface for all timetabling entities.
#[async_trait]
pub trait TimetableRepository: Send + Sync {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ---- Departments ----

    async fn list_departments(&self) -> RepositoryResult<Vec<Department>>;
    async fn get_department(&self, id: DepartmentId) -> RepositoryResult<Department>;
    async fn store_department(&self, department: Department) -> RepositoryResult<DepartmentId>;

    // ---- Subjects ----

    async fn list_subjects(&self, department: DepartmentId) -> RepositoryResult<Vec<Subject>>;
    async fn store_subject(&self, subject: Subject) -> RepositoryResult<()>;

    // ---- Faculty ----

    /// List faculty, optionally restricted to one department.
    async fn list_faculty(
        &self,
        department: Option<DepartmentId>,
    ) -> RepositoryResult<Vec<FacultyMember>>;
    async fn get_faculty(&self, id: FacultyId) -> RepositoryResult<FacultyMember>;
    /// Store a faculty member. An id of 0 means "assign one"; any other id
    /// upserts. Returns the effective id.
    async fn store_faculty(&self, member: FacultyMember) -> RepositoryResult<FacultyId>;

    // ---- Classrooms ----

    async fn list_classrooms(&self) -> RepositoryResult<Vec<Classroom>>;
    async fn store_classroom(&self, classroom: Classroom) -> RepositoryResult<()>;

    // ---- Timetables ----

    async fn list_timetables(&self) -> RepositoryResult<Vec<TimetableInfo>>;
    async fn get_timetable(&self, id: TimetableId) -> RepositoryResult<TimetableRecord>;
    /// Store a timetable, assigning its id. Returns the assigned id.
    async fn store_timetable(&self, record: TimetableRecord) -> RepositoryResult<TimetableId>;

    // ---- Messages ----

    async fn store_message(&self, message: PrincipalMessage) -> RepositoryResult<MessageId>;
    async fn mark_message_relayed(&self, id: MessageId) -> RepositoryResult<()>;
    async fn list_messages(&self) -> RepositoryResult<Vec<PrincipalMessage>>;

    // ---- Users ----

    async fn find_user(&self, username: &str) -> RepositoryResult<Option<UserRecord>>;
    async fn store_user(&self, user: UserRecord) -> RepositoryResult<UserId>;
}
