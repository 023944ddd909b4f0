//! PostgreSQL integration tests
//!
//! Runs the teacher service and the repositories against a real database.
//! Tests return early when no database is available.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serial_test::serial;
use ClassRoster::models::{CreateStudentRequest, StudentFilter, UpdateStudentRequest};
use ClassRoster::services::ServiceFactory;
use ClassRoster::{RosterError, SchoolStore};

#[tokio::test]
#[serial]
async fn test_register_is_idempotent() {
    let Some(db) = TestDatabase::start().await else { return };
    let service = db.teacher_service();
    let students = emails(&["studentjon@gmail.com", "studenthon@gmail.com"]);

    service.register_students("teacherken@gmail.com", &students).await.unwrap();
    service.register_students("teacherken@gmail.com", &students).await.unwrap();

    assert_eq!(db.count_records("teachers").await.unwrap(), 1);
    assert_eq!(db.count_records("students").await.unwrap(), 2);
    assert_eq!(db.count_records("teacher_students").await.unwrap(), 2);
}

#[tokio::test]
#[serial]
async fn test_common_students() {
    let Some(db) = TestDatabase::start().await else { return };
    let service = db.teacher_service();

    service.register_students("t1@x.com", &emails(&["c@x.com", "a@x.com", "b@x.com"])).await.unwrap();
    service.register_students("t2@x.com", &emails(&["a@x.com", "b@x.com", "d@x.com"])).await.unwrap();

    assert_eq!(
        service.get_common_students(&emails(&["t1@x.com"])).await.unwrap(),
        vec!["a@x.com", "b@x.com", "c@x.com"]
    );
    assert_eq!(
        service.get_common_students(&emails(&["t1@x.com", "t2@x.com"])).await.unwrap(),
        vec!["a@x.com", "b@x.com"]
    );
    assert!(service
        .get_common_students(&emails(&["t1@x.com", "nonexistent@x.com"]))
        .await
        .unwrap()
        .is_empty());
    assert!(service
        .get_common_students(&emails(&["t1@x.com", "t1@x.com"]))
        .await
        .unwrap()
        .is_empty());

    service.suspend_student("b@x.com").await.unwrap();
    assert_eq!(
        service.get_common_students(&emails(&["t1@x.com", "t2@x.com"])).await.unwrap(),
        vec!["a@x.com"]
    );
}

#[tokio::test]
#[serial]
async fn test_suspend_student() {
    let Some(db) = TestDatabase::start().await else { return };
    let service = db.teacher_service();

    let err = service.suspend_student("ghost@x.com").await.unwrap_err();
    assert_matches!(err, RosterError::StudentNotFound { .. });

    service.register_students("t@x.com", &emails(&["s@x.com"])).await.unwrap();
    assert_eq!(db.suspended("s@x.com").await.unwrap(), Some(false));

    service.suspend_student("s@x.com").await.unwrap();
    assert_eq!(db.suspended("s@x.com").await.unwrap(), Some(true));

    service.suspend_student("s@x.com").await.unwrap();
    assert_eq!(db.suspended("s@x.com").await.unwrap(), Some(true));
}

#[tokio::test]
#[serial]
async fn test_notification_recipients() {
    let Some(db) = TestDatabase::start().await else { return };
    let service = db.teacher_service();

    let recipients = service.get_notification_recipients("t@x.com", "Hello @new@x.com").await.unwrap();
    assert_eq!(recipients, vec!["new@x.com"]);
    assert_eq!(db.suspended("new@x.com").await.unwrap(), Some(false));
    assert_eq!(db.count_records("teachers").await.unwrap(), 0);

    service.register_students("t@x.com", &emails(&["s2@x.com", "s1@x.com", "benched@x.com"])).await.unwrap();
    service.suspend_student("benched@x.com").await.unwrap();

    let recipients = service.get_notification_recipients("t@x.com", "No mentions here").await.unwrap();
    assert_eq!(recipients, vec!["s1@x.com", "s2@x.com"]);

    let recipients = service
        .get_notification_recipients("t@x.com", "Hi @s1@x.com @new@x.com @benched@x.com")
        .await
        .unwrap();
    assert_eq!(recipients, vec!["benched@x.com", "new@x.com", "s1@x.com", "s2@x.com"]);
    assert_eq!(db.count_records("students").await.unwrap(), 4);
    assert_eq!(db.suspended("benched@x.com").await.unwrap(), Some(true));
}

#[tokio::test]
#[serial]
async fn test_store_contract() {
    let Some(db) = TestDatabase::start().await else { return };
    let store = db.database_service();

    let teacher = store.create_teacher("t@x.com").await.unwrap();
    let duplicate = store.create_teacher("t@x.com").await.unwrap_err();
    assert_eq!(duplicate.status_code(), 409);

    let active = store.create_student("a@x.com").await.unwrap();
    let records = vec![CreateStudentRequest::active("a@x.com"), CreateStudentRequest::active("b@x.com")];
    assert_eq!(store.create_students_bulk(&records, true).await.unwrap(), 1);
    assert!(store.create_students_bulk(&records, false).await.is_err());

    let b = store.find_student_by_email("b@x.com").await.unwrap().unwrap();
    assert_eq!(store.update_teacher_students(teacher.id, &[active.id, b.id]).await.unwrap(), 2);
    assert_eq!(store.update_teacher_students(teacher.id, &[active.id]).await.unwrap(), 0);

    let suspended = store
        .update_student("b@x.com", UpdateStudentRequest { suspended: Some(true) })
        .await
        .unwrap();
    assert!(suspended.suspended);

    let all = store.find_teacher_by_email("t@x.com", StudentFilter::All).await.unwrap().unwrap();
    assert_eq!(all.student_emails().collect::<Vec<_>>(), vec!["a@x.com", "b@x.com"]);
    let found = store
        .find_teachers_by_emails(&emails(&["t@x.com", "missing@x.com"]), StudentFilter::Active)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].student_emails().collect::<Vec<_>>(), vec!["a@x.com"]);

    let only_suspended = store
        .find_students_by_emails(&emails(&["a@x.com", "b@x.com", "c@x.com"]), Some(true))
        .await
        .unwrap();
    assert_eq!(only_suspended.len(), 1);
    assert_eq!(only_suspended[0].email, "b@x.com");

    let missing = store
        .update_student("ghost@x.com", UpdateStudentRequest { suspended: Some(true) })
        .await
        .unwrap_err();
    assert_matches!(missing, RosterError::Database(sqlx::Error::RowNotFound));
}

#[tokio::test]
#[serial]
async fn test_health_and_stats() {
    let Some(db) = TestDatabase::start().await else { return };
    let database = db.database_service();
    let services = ServiceFactory::new(database.clone());

    services
        .teacher_service
        .register_students("t@x.com", &emails(&["s@x.com"]))
        .await
        .unwrap();

    let status = services.health_check().await;
    assert!(status.is_healthy());
    assert!(status.persistent);
    assert!(status.database_latency_ms.is_some());

    let stats = database.get_system_stats().await.unwrap();
    assert_eq!(stats, serde_json::json!({ "teachers": 1, "students": 1 }));
}
