use crate::common::{class_row, school};
use backend::pages::{check_in, close_attendance_session, start_attendance_session, SESSION_CLOSED};
use backend::testing::profile;
use backend::Table;
use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, Role, STATUS_PRESENT};

#[tokio::test]
async fn student_checks_in_once_while_session_is_open() {
    let school = school();
    let teacher = profile("teacher-profile", "teacher-user", Role::Teacher);
    let student = profile("student-profile", "student-user", Role::Student);
    school
        .store
        .seed(Table::Classes, vec![class_row("class-1", &teacher.id)]);

    let session = start_attendance_session(school.store.as_ref(), &teacher, "class-1")
        .await
        .unwrap();
    assert!(session.is_active());
    assert_eq!(session.teacher_id, teacher.id);

    let record = check_in(school.store.as_ref(), &student, &format!("  {}  ", session.qr_code))
        .await
        .unwrap();
    assert_eq!(record.session_id, session.id);
    assert_eq!(record.student_id, student.id);
    assert_eq!(record.status, STATUS_PRESENT);

    let again = check_in(school.store.as_ref(), &student, &session.qr_code)
        .await
        .unwrap_err();
    assert_eq!(again.kind, AppErrorKind::Conflict);

    let closed = close_attendance_session(school.store.as_ref(), &teacher, &session.id)
        .await
        .unwrap();
    assert_eq!(closed.status, SESSION_CLOSED);
    assert!(!closed.is_active());

    let other = profile("other-profile", "other-user", Role::Student);
    let late = check_in(school.store.as_ref(), &other, &session.qr_code)
        .await
        .unwrap_err();
    assert_eq!(late.kind, AppErrorKind::NotFound);
    assert_eq!(school.store.rows(Table::Attendance).len(), 1);
}

#[tokio::test]
async fn blank_and_unknown_codes_are_rejected() {
    let school = school();
    let student = profile("student-profile", "student-user", Role::Student);

    let blank = check_in(school.store.as_ref(), &student, "   ").await.unwrap_err();
    assert_eq!(blank.kind, AppErrorKind::BadRequest);

    let unknown = check_in(school.store.as_ref(), &student, "nope").await.unwrap_err();
    assert_eq!(unknown.kind, AppErrorKind::NotFound);
}

#[tokio::test]
async fn only_students_check_in() {
    let school = school();
    let teacher = profile("teacher-profile", "teacher-user", Role::Teacher);
    let err = check_in(school.store.as_ref(), &teacher, "code").await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Forbidden);
}

#[tokio::test]
async fn teachers_cannot_close_each_others_sessions() {
    let school = school();
    let owner = profile("teacher-profile", "teacher-user", Role::Teacher);
    let other = profile("teacher-2", "teacher-user-2", Role::Teacher);

    let session = start_attendance_session(school.store.as_ref(), &owner, "class-1")
        .await
        .unwrap();
    let err = close_attendance_session(school.store.as_ref(), &other, &session.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
}

#[tokio::test]
async fn starting_requires_a_class() {
    let school = school();
    let teacher = profile("teacher-profile", "teacher-user", Role::Teacher);
    let err = start_attendance_session(school.store.as_ref(), &teacher, " ")
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::BadRequest);
    assert!(school.store.rows(Table::AttendanceSessions).is_empty());
}
