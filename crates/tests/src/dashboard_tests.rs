use crate::common::school;
use backend::dashboard::fetch_dashboard_on;
use backend::testing::{attendance_row, event_row, profile, test_row};
use backend::Table;
use pretty_assertions::assert_eq;
use shared_types::Role;

const TODAY: &str = "2024-03-01";

fn seed_events(school: &crate::common::School) {
    school.store.seed(
        Table::Events,
        vec![
            event_row("past", "2024-02-01"),
            event_row("e3", "2024-05-01"),
            event_row("e1", "2024-03-01"),
            event_row("e2", "2024-04-01"),
        ],
    );
}

#[tokio::test]
async fn admin_sees_school_wide_counts() {
    let school = school();
    school.seed_students(3);
    seed_events(&school);
    school.store.seed(
        Table::Tests,
        vec![test_row("t1", "teacher-a"), test_row("t2", "teacher-b")],
    );
    school.store.seed(
        Table::Attendance,
        vec![
            attendance_row("a1", "s0", "present"),
            attendance_row("a2", "s1", "absent"),
            attendance_row("a3", "s2", "present"),
            attendance_row("a4", "s0", "present"),
        ],
    );

    let admin = profile("admin-profile", "admin-user", Role::Admin);
    let summary = fetch_dashboard_on(school.store.as_ref(), &admin, TODAY).await;

    assert_eq!(summary.total_students, 3);
    assert_eq!(summary.total_tests, 2);
    assert_eq!(summary.total_events, 3);
    assert_eq!(summary.attendance_rate, 75);
    assert_eq!(summary.degraded_reads, 0);
    let ids: Vec<_> = summary.upcoming_events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2", "e3"]);
}

#[tokio::test]
async fn failing_table_counts_as_empty() {
    let school = school();
    school.seed_students(2);
    seed_events(&school);
    school.store.fail_table(Table::Tests);

    let admin = profile("admin-profile", "admin-user", Role::Admin);
    let summary = fetch_dashboard_on(school.store.as_ref(), &admin, TODAY).await;

    assert_eq!(summary.total_tests, 0);
    assert_eq!(summary.total_students, 2);
    assert_eq!(summary.total_events, 3);
    assert_eq!(summary.degraded_reads, 1);
}

#[tokio::test]
async fn teacher_counts_only_own_tests() {
    let school = school();
    school.seed_students(4);
    school.store.seed(
        Table::Tests,
        vec![
            test_row("t1", "teacher-user"),
            test_row("t2", "teacher-user"),
            test_row("t3", "someone-else"),
        ],
    );

    let teacher = profile("teacher-profile", "teacher-user", Role::Teacher);
    let summary = fetch_dashboard_on(school.store.as_ref(), &teacher, TODAY).await;

    assert_eq!(summary.total_students, 4);
    assert_eq!(summary.total_tests, 2);
    assert_eq!(summary.attendance_rate, 0);
    assert!(!school.store.was_read(Table::Attendance));
}

#[tokio::test]
async fn student_sees_own_rate_and_events() {
    let school = school();
    seed_events(&school);
    school.store.seed(
        Table::Attendance,
        vec![
            attendance_row("a1", "student-profile", "present"),
            attendance_row("a2", "student-profile", "absent"),
            attendance_row("a3", "other-profile", "absent"),
        ],
    );

    let student = profile("student-profile", "student-user", Role::Student);
    let summary = fetch_dashboard_on(school.store.as_ref(), &student, TODAY).await;

    assert_eq!(summary.attendance_rate, 50);
    assert_eq!(summary.total_events, 3);
    assert_eq!(summary.total_students, 0);
    assert!(!school.store.was_read(Table::Students));
    assert!(!school.store.was_read(Table::Tests));
}

#[tokio::test]
async fn unknown_role_reads_nothing() {
    let school = school();
    school.seed_students(2);
    let mut principal = profile("p-profile", "p-user", Role::Admin);
    principal.raw_role = "principal".into();

    let summary = fetch_dashboard_on(school.store.as_ref(), &principal, TODAY).await;

    assert_eq!(summary.role, None);
    assert_eq!(summary.total_students, 0);
    assert!(school.store.read_log().is_empty());
}
