use std::sync::Arc;
use std::time::Duration;

use dts_rust::api::{ClassId, ClassroomId, DepartmentId, FacultyId, SubjectId, TimetableId};
use dts_rust::auth::MemorySessionStore;
use dts_rust::db::models::TimetableRecord;
use dts_rust::db::repository::TimetableRepository;
use dts_rust::db::LocalRepository;
use dts_rust::http::AppState;
use dts_rust::models::{ScheduledClass, TimeSlot};
use dts_rust::services::generation::LocalEngine;
use dts_rust::services::notifier::NullNotifier;

/// Application state over a seeded in-memory repository, with the
/// in-process engine and no external relay.
pub fn test_state() -> AppState {
    let repository: Arc<dyn TimetableRepository> = Arc::new(LocalRepository::with_seed_data());
    let engine = Arc::new(LocalEngine::new(repository.clone()));
    AppState::new(
        repository,
        Arc::new(MemorySessionStore::new()),
        engine,
        Arc::new(NullNotifier),
        Duration::from_millis(5),
    )
}

/// A scheduled class with an explicit slot.
pub fn class(
    id: i64,
    faculty: i64,
    classroom: i64,
    day: &str,
    start: &str,
    end: &str,
) -> ScheduledClass {
    ScheduledClass {
        id: ClassId::new(id),
        subject_id: SubjectId::new(id),
        subject_name: Some(format!("Subject {}", id)),
        faculty_id: FacultyId::new(faculty),
        faculty_name: None,
        classroom_id: ClassroomId::new(classroom),
        classroom_name: None,
        class_type: "lecture".to_string(),
        timeslot_detail: Some(TimeSlot::new(day, start, end)),
    }
}

/// Store a timetable with the given classes and return its id.
pub async fn store_timetable(
    repository: &dyn TimetableRepository,
    name: &str,
    classes: Vec<ScheduledClass>,
) -> TimetableId {
    repository
        .store_timetable(TimetableRecord {
            id: TimetableId::new(0),
            name: name.to_string(),
            department_id: DepartmentId::new(1),
            classes,
            created_at: chrono::Utc::now(),
        })
        .await
        .expect("store_timetable failed")
}
