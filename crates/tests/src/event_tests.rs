use crate::common::school;
use backend::pages::{create_event, load_events};
use backend::testing::{event_row, profile};
use backend::Table;
use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, NewEvent, Role};

fn sports_day() -> NewEvent {
    NewEvent {
        title: "  Sports Day ".into(),
        description: Some("   ".into()),
        event_date: "2024-04-12".into(),
        location: Some("Main field".into()),
    }
}

#[tokio::test]
async fn admin_creates_trimmed_event() {
    let school = school();
    let admin = profile("admin-profile", "admin-user", Role::Admin);

    let created = create_event(school.store.as_ref(), &admin, sports_day())
        .await
        .unwrap();

    assert_eq!(created.title, "Sports Day");
    assert_eq!(created.description, None);
    assert_eq!(created.location.as_deref(), Some("Main field"));
    assert_eq!(created.created_by, "admin-user");
    assert_eq!(school.store.rows(Table::Events).len(), 1);
}

#[tokio::test]
async fn blank_title_reports_field_error() {
    let school = school();
    let admin = profile("admin-profile", "admin-user", Role::Admin);
    let event = NewEvent {
        title: "   ".into(),
        ..sports_day()
    };

    let err = create_event(school.store.as_ref(), &admin, event).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert_eq!(
        err.field_errors.get("title").map(String::as_str),
        Some("Title is required")
    );
    assert!(school.store.rows(Table::Events).is_empty());
}

#[tokio::test]
async fn students_cannot_create_events() {
    let school = school();
    let student = profile("student-profile", "student-user", Role::Student);
    let err = create_event(school.store.as_ref(), &student, sports_day())
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Forbidden);
}

#[tokio::test]
async fn listing_skips_past_events() {
    let school = school();
    school.store.seed(
        Table::Events,
        vec![
            event_row("later", "2024-06-01"),
            event_row("past", "2024-01-01"),
            event_row("today", "2024-03-01"),
        ],
    );

    let events = load_events(school.store.as_ref(), "2024-03-01").await;
    let ids: Vec<_> = events.rows().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["today", "later"]);
}
