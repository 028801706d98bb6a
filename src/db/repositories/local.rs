//! In-memory repository implementation.
//!
//! Backs local development and the test suites. All collections live behind
//! `parking_lot` RwLocks; id assignment is a per-entity atomic counter.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::api::{ClassroomId, DepartmentId, FacultyId, MessageId, SubjectId, TimetableId, UserId};
use crate::db::models::{
    Classroom, Department, FacultyMember, PrincipalMessage, Subject, TimetableRecord, UserRecord,
};
use crate::db::repository::{
    ErrorContext, RepositoryError, RepositoryResult, TimetableRepository,
};
use crate::routes::landing::TimetableInfo;

/// In-memory implementation of [`TimetableRepository`].
#[derive(Default)]
pub struct LocalRepository {
    departments: RwLock<HashMap<i64, Department>>,
    subjects: RwLock<HashMap<i64, Subject>>,
    faculty: RwLock<HashMap<i64, FacultyMember>>,
    classrooms: RwLock<HashMap<i64, Classroom>>,
    timetables: RwLock<HashMap<i64, TimetableRecord>>,
    messages: RwLock<Vec<PrincipalMessage>>,
    users: RwLock<HashMap<String, UserRecord>>,
    next_faculty_id: AtomicI64,
    next_timetable_id: AtomicI64,
    next_message_id: AtomicI64,
    next_user_id: AtomicI64,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            next_faculty_id: AtomicI64::new(1),
            next_timetable_id: AtomicI64::new(1),
            next_message_id: AtomicI64::new(1),
            next_user_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    /// A repository pre-populated with a small department inventory, enough
    /// to exercise every endpoint without external data.
    pub fn with_seed_data() -> Self {
        let repo = Self::new();
        {
            let mut departments = repo.departments.write();
            departments.insert(
                1,
                Department {
                    id: DepartmentId::new(1),
                    name: "Computer Science".to_string(),
                    code: "CSE".to_string(),
                },
            );
            departments.insert(
                2,
                Department {
                    id: DepartmentId::new(2),
                    name: "Electronics".to_string(),
                    code: "ECE".to_string(),
                },
            );
        }
        {
            let mut subjects = repo.subjects.write();
            for (id, name, code, dept) in [
                (1, "Algorithms", "CS301", 1),
                (2, "Operating Systems", "CS302", 1),
                (3, "Databases", "CS303", 1),
                (4, "Signals and Systems", "EC201", 2),
            ] {
                subjects.insert(
                    id,
                    Subject {
                        id: SubjectId::new(id),
                        name: name.to_string(),
                        code: code.to_string(),
                        department_id: DepartmentId::new(dept),
                    },
                );
            }
        }
        {
            let mut faculty = repo.faculty.write();
            for (id, name, dept, designation) in [
                (1, "Dr. Rao", 1, Some("Professor")),
                (2, "Dr. Iyer", 1, Some("Assistant Professor")),
                (3, "Dr. Menon", 2, None),
            ] {
                faculty.insert(
                    id,
                    FacultyMember {
                        id: FacultyId::new(id),
                        name: name.to_string(),
                        department_id: DepartmentId::new(dept),
                        designation: designation.map(str::to_string),
                    },
                );
            }
            repo.next_faculty_id.store(4, Ordering::SeqCst);
        }
        {
            let mut classrooms = repo.classrooms.write();
            for (id, name, capacity) in [(1, "CS-101", Some(60)), (2, "CS-102", Some(40)), (3, "EC-201", None)] {
                classrooms.insert(
                    id,
                    Classroom {
                        id: ClassroomId::new(id),
                        name: name.to_string(),
                        capacity,
                    },
                );
            }
        }
        repo
    }
}

#[async_trait]
impl TimetableRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn list_departments(&self) -> RepositoryResult<Vec<Department>> {
        let mut departments: Vec<Department> = self.departments.read().values().cloned().collect();
        departments.sort_by_key(|d| d.id);
        Ok(departments)
    }

    async fn get_department(&self, id: DepartmentId) -> RepositoryResult<Department> {
        self.departments.read().get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Department {} not found", id),
                ErrorContext::new("get_department")
                    .with_entity("department")
                    .with_entity_id(id),
            )
        })
    }

    async fn store_department(&self, department: Department) -> RepositoryResult<DepartmentId> {
        let id = department.id;
        self.departments.write().insert(id.value(), department);
        Ok(id)
    }

    async fn list_subjects(&self, department: DepartmentId) -> RepositoryResult<Vec<Subject>> {
        let mut subjects: Vec<Subject> = self
            .subjects
            .read()
            .values()
            .filter(|s| s.department_id == department)
            .cloned()
            .collect();
        subjects.sort_by_key(|s| s.id);
        Ok(subjects)
    }

    async fn store_subject(&self, subject: Subject) -> RepositoryResult<()> {
        self.subjects.write().insert(subject.id.value(), subject);
        Ok(())
    }

    async fn list_faculty(
        &self,
        department: Option<DepartmentId>,
    ) -> RepositoryResult<Vec<FacultyMember>> {
        let mut members: Vec<FacultyMember> = self
            .faculty
            .read()
            .values()
            .filter(|m| department.map_or(true, |d| m.department_id == d))
            .cloned()
            .collect();
        members.sort_by_key(|m| m.id);
        Ok(members)
    }

    async fn get_faculty(&self, id: FacultyId) -> RepositoryResult<FacultyMember> {
        self.faculty.read().get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Faculty member {} not found", id),
                ErrorContext::new("get_faculty")
                    .with_entity("faculty")
                    .with_entity_id(id),
            )
        })
    }

    async fn store_faculty(&self, mut member: FacultyMember) -> RepositoryResult<FacultyId> {
        if member.name.trim().is_empty() {
            return Err(RepositoryError::validation_with_context(
                "Faculty name must not be empty",
                ErrorContext::new("store_faculty").with_entity("faculty"),
            ));
        }
        if member.id.value() == 0 {
            member.id = FacultyId::new(self.next_faculty_id.fetch_add(1, Ordering::SeqCst));
        }
        let id = member.id;
        self.faculty.write().insert(id.value(), member);
        Ok(id)
    }

    async fn list_classrooms(&self) -> RepositoryResult<Vec<Classroom>> {
        let mut classrooms: Vec<Classroom> = self.classrooms.read().values().cloned().collect();
        classrooms.sort_by_key(|c| c.id);
        Ok(classrooms)
    }

    async fn store_classroom(&self, classroom: Classroom) -> RepositoryResult<()> {
        self.classrooms.write().insert(classroom.id.value(), classroom);
        Ok(())
    }

    async fn list_timetables(&self) -> RepositoryResult<Vec<TimetableInfo>> {
        let mut infos: Vec<TimetableInfo> = self
            .timetables
            .read()
            .values()
            .map(|t| TimetableInfo {
                timetable_id: t.id,
                timetable_name: t.name.clone(),
                department_id: t.department_id,
            })
            .collect();
        infos.sort_by_key(|t| t.timetable_id);
        Ok(infos)
    }

    async fn get_timetable(&self, id: TimetableId) -> RepositoryResult<TimetableRecord> {
        self.timetables.read().get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Timetable {} not found", id),
                ErrorContext::new("get_timetable")
                    .with_entity("timetable")
                    .with_entity_id(id),
            )
        })
    }

    async fn store_timetable(&self, mut record: TimetableRecord) -> RepositoryResult<TimetableId> {
        if record.name.trim().is_empty() {
            return Err(RepositoryError::validation_with_context(
                "Timetable name must not be empty",
                ErrorContext::new("store_timetable").with_entity("timetable"),
            ));
        }
        let id = TimetableId::new(self.next_timetable_id.fetch_add(1, Ordering::SeqCst));
        record.id = id;
        self.timetables.write().insert(id.value(), record);
        Ok(id)
    }

    async fn store_message(&self, mut message: PrincipalMessage) -> RepositoryResult<MessageId> {
        let id = MessageId::new(self.next_message_id.fetch_add(1, Ordering::SeqCst));
        message.id = id;
        self.messages.write().push(message);
        Ok(id)
    }

    async fn mark_message_relayed(&self, id: MessageId) -> RepositoryResult<()> {
        let mut messages = self.messages.write();
        match messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                message.relayed = true;
                Ok(())
            }
            None => Err(RepositoryError::not_found_with_context(
                format!("Message {} not found", id),
                ErrorContext::new("mark_message_relayed")
                    .with_entity("message")
                    .with_entity_id(id),
            )),
        }
    }

    async fn list_messages(&self) -> RepositoryResult<Vec<PrincipalMessage>> {
        Ok(self.messages.read().clone())
    }

    async fn find_user(&self, username: &str) -> RepositoryResult<Option<UserRecord>> {
        Ok(self.users.read().get(username).cloned())
    }

    async fn store_user(&self, mut user: UserRecord) -> RepositoryResult<UserId> {
        let mut users = self.users.write();
        if users.contains_key(&user.username) {
            return Err(RepositoryError::already_exists(format!(
                "Username '{}' is taken",
                user.username
            )));
        }
        let id = UserId::new(self.next_user_id.fetch_add(1, Ordering::SeqCst));
        user.id = id;
        users.insert(user.username.clone(), user);
        Ok(id)
    }
}
