//! Repository behavior tests against the in-memory implementation.

mod support;

use dts_rust::api::{ClassroomId, DepartmentId, FacultyId, MessageId, SubjectId, TimetableId, UserId};
use dts_rust::auth::Role;
use dts_rust::db::models::{
    Classroom, Department, FacultyMember, PrincipalMessage, Subject, UserRecord,
};
use dts_rust::db::repository::{RepositoryError, TimetableRepository};
use dts_rust::db::{LocalRepository, RepositoryFactory};

use support::{class, store_timetable};

#[tokio::test]
async fn seeded_departments_are_listed_in_id_order() {
    let repo = LocalRepository::with_seed_data();
    let departments = repo.list_departments().await.unwrap();
    assert_eq!(departments.len(), 2);
    assert_eq!(departments[0].code, "CSE");
    assert_eq!(departments[1].code, "ECE");
}

#[tokio::test]
async fn faculty_filter_by_department() {
    let repo = LocalRepository::with_seed_data();
    let all = repo.list_faculty(None).await.unwrap();
    let cse = repo.list_faculty(Some(DepartmentId::new(1))).await.unwrap();
    assert!(all.len() > cse.len());
    assert!(cse.iter().all(|m| m.department_id == DepartmentId::new(1)));
}

#[tokio::test]
async fn unknown_lookups_return_not_found() {
    let repo = LocalRepository::new();
    assert!(matches!(
        repo.get_department(DepartmentId::new(404)).await,
        Err(RepositoryError::NotFound { .. })
    ));
    assert!(matches!(
        repo.get_faculty(FacultyId::new(404)).await,
        Err(RepositoryError::NotFound { .. })
    ));
    assert!(matches!(
        repo.get_timetable(TimetableId::new(404)).await,
        Err(RepositoryError::NotFound { .. })
    ));
}

#[tokio::test]
async fn stored_entities_come_back_on_lookup() {
    // An empty repository from the factory, populated one entity at a time.
    let repo = RepositoryFactory::create_local_empty();

    let dept_id = repo
        .store_department(Department {
            id: DepartmentId::new(1),
            name: "Mechanical".to_string(),
            code: "MECH".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(repo.get_department(dept_id).await.unwrap().code, "MECH");
    assert_eq!(repo.list_departments().await.unwrap().len(), 1);

    repo.store_subject(Subject {
        id: SubjectId::new(1),
        name: "Thermodynamics".to_string(),
        code: "ME201".to_string(),
        department_id: dept_id,
    })
    .await
    .unwrap();
    let subjects = repo.list_subjects(dept_id).await.unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].code, "ME201");
    // Subjects of another department stay invisible.
    assert!(repo.list_subjects(DepartmentId::new(2)).await.unwrap().is_empty());

    repo.store_classroom(Classroom {
        id: ClassroomId::new(1),
        name: "ME-101".to_string(),
        capacity: Some(80),
    })
    .await
    .unwrap();
    let classrooms = repo.list_classrooms().await.unwrap();
    assert_eq!(classrooms.len(), 1);
    assert_eq!(classrooms[0].capacity, Some(80));
}

#[tokio::test]
async fn faculty_store_assigns_ids_past_the_seed() {
    let repo = LocalRepository::with_seed_data();
    let id = repo
        .store_faculty(FacultyMember {
            id: FacultyId::new(0),
            name: "Dr. Bose".to_string(),
            department_id: DepartmentId::new(1),
            designation: None,
        })
        .await
        .unwrap();

    // Seed data occupies ids 1-3.
    assert_eq!(id, FacultyId::new(4));
    assert_eq!(repo.get_faculty(id).await.unwrap().name, "Dr. Bose");
    assert_eq!(repo.list_faculty(None).await.unwrap().len(), 4);
}

#[tokio::test]
async fn faculty_store_upserts_explicit_ids() {
    let repo = LocalRepository::with_seed_data();
    let id = repo
        .store_faculty(FacultyMember {
            id: FacultyId::new(2),
            name: "Dr. Iyer".to_string(),
            department_id: DepartmentId::new(1),
            designation: Some("Professor".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(id, FacultyId::new(2));
    let member = repo.get_faculty(id).await.unwrap();
    assert_eq!(member.designation.as_deref(), Some("Professor"));
    assert_eq!(repo.list_faculty(None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn blank_faculty_name_is_rejected() {
    let repo = LocalRepository::new();
    assert!(matches!(
        repo.store_faculty(FacultyMember {
            id: FacultyId::new(0),
            name: "  ".to_string(),
            department_id: DepartmentId::new(1),
            designation: None,
        })
        .await,
        Err(RepositoryError::ValidationError { .. })
    ));
}

#[tokio::test]
async fn timetables_get_sequential_ids() {
    let repo = LocalRepository::with_seed_data();
    let a = store_timetable(&repo, "first", vec![]).await;
    let b = store_timetable(&repo, "second", vec![class(1, 1, 1, "Monday", "08:00", "09:00")]).await;
    assert!(b > a);

    let infos = repo.list_timetables().await.unwrap();
    assert_eq!(infos.len(), 2);
    assert_eq!(infos[0].timetable_name, "first");

    let record = repo.get_timetable(b).await.unwrap();
    assert_eq!(record.classes.len(), 1);
}

#[tokio::test]
async fn empty_timetable_name_is_rejected() {
    let repo = LocalRepository::new();
    let record = dts_rust::db::models::TimetableRecord {
        id: TimetableId::new(0),
        name: "   ".to_string(),
        department_id: DepartmentId::new(1),
        classes: vec![],
        created_at: chrono::Utc::now(),
    };
    assert!(matches!(
        repo.store_timetable(record).await,
        Err(RepositoryError::ValidationError { .. })
    ));
}

#[tokio::test]
async fn messages_store_and_relay_flag() {
    let repo = LocalRepository::new();
    let id = repo
        .store_message(PrincipalMessage {
            id: MessageId::new(0),
            sender: "asha".to_string(),
            sender_role: "student".to_string(),
            body: "hello".to_string(),
            created_at: chrono::Utc::now(),
            relayed: false,
        })
        .await
        .unwrap();

    repo.mark_message_relayed(id).await.unwrap();
    let messages = repo.list_messages().await.unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].relayed);

    assert!(matches!(
        repo.mark_message_relayed(MessageId::new(99)).await,
        Err(RepositoryError::NotFound { .. })
    ));
}

#[tokio::test]
async fn duplicate_usernames_are_rejected() {
    let repo = LocalRepository::new();
    let user = UserRecord {
        id: UserId::new(0),
        username: "asha".to_string(),
        password_salt: "s".to_string(),
        password_digest: "d".to_string(),
        role: Role::Student,
        department_id: DepartmentId::new(1),
    };
    repo.store_user(user.clone()).await.unwrap();
    assert!(matches!(
        repo.store_user(user).await,
        Err(RepositoryError::AlreadyExists { .. })
    ));

    let found = repo.find_user("asha").await.unwrap().unwrap();
    assert_eq!(found.role, Role::Student);
    assert!(repo.find_user("nobody").await.unwrap().is_none());
}
