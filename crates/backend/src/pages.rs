//! Data behind the routed pages, and the few writes the app performs.
//!
//! Loaders are role-scoped. A role that may not see a page gets
//! `Forbidden`; a read failure degrades to an empty [`ReadOutcome`].

use crate::dashboard::{read, upcoming_events_query, ReadOutcome};
use crate::error_convert::ValidateRequest;
use crate::query::{Query, Table};
use crate::store::{insert_one, select_as, DataStore, decode_rows};
use serde_json::json;
use shared_types::{
    attendance_rate, AppError, AttendanceInsert, AttendanceRecord, AttendanceSession,
    AttendanceSessionInsert, ClassRecord, EventInsert, EventRecord, NewEvent, Profile, Role,
    Student, TestRecord, TestResult, SESSION_ACTIVE, STATUS_PRESENT,
};

/// Status written when a teacher ends a session.
pub const SESSION_CLOSED: &str = "closed";

fn require_role(profile: &Profile, allowed: &[Role]) -> Result<Role, AppError> {
    match profile.role() {
        Some(role) if allowed.contains(&role) => Ok(role),
        _ => {
            tracing::warn!(profile_id = %profile.id, role = %profile.raw_role, "Role not allowed here");
            Err(AppError::forbidden("You do not have access to this page"))
        }
    }
}

/// Student roster, for teachers and admins.
pub async fn load_students(
    store: &dyn DataStore,
    profile: &Profile,
) -> Result<ReadOutcome<Student>, AppError> {
    require_role(profile, &[Role::Teacher, Role::Admin])?;
    let query = Query::table(Table::Students).order("enrollment_number", true);
    Ok(read(store, query).await)
}

#[derive(Debug, Clone, PartialEq)]
pub enum TestsView {
    /// A student's own results with the test embedded.
    Results(ReadOutcome<TestResult>),
    /// Tests authored by a teacher, or every test for an admin.
    Authored(ReadOutcome<TestRecord>),
}

pub async fn load_tests(store: &dyn DataStore, profile: &Profile) -> Result<TestsView, AppError> {
    let role = require_role(profile, &Role::ALL)?;
    let view = match role {
        Role::Student => {
            let query = Query::table(Table::TestResults)
                .select("*, tests(*)")
                .eq("student_id", profile.id.as_str())
                .order("created_at", false);
            TestsView::Results(read(store, query).await)
        }
        Role::Teacher => {
            let query = Query::table(Table::Tests)
                .eq("created_by", profile.user_id.as_str())
                .order("test_date", false);
            TestsView::Authored(read(store, query).await)
        }
        Role::Admin => {
            let query = Query::table(Table::Tests).order("test_date", false);
            TestsView::Authored(read(store, query).await)
        }
    };
    Ok(view)
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttendanceView {
    /// A student's own check-ins.
    Own {
        records: ReadOutcome<AttendanceRecord>,
        rate: u32,
    },
    /// A teacher's sessions and the classes they can open one for.
    Sessions {
        sessions: ReadOutcome<AttendanceSession>,
        classes: ReadOutcome<ClassRecord>,
    },
    /// Every record, for admins.
    All {
        records: ReadOutcome<AttendanceRecord>,
        rate: u32,
    },
}

pub async fn load_attendance(
    store: &dyn DataStore,
    profile: &Profile,
) -> Result<AttendanceView, AppError> {
    let role = require_role(profile, &Role::ALL)?;
    let view = match role {
        Role::Student => {
            let query = Query::table(Table::Attendance)
                .select("*, attendance_sessions(*)")
                .eq("student_id", profile.id.as_str())
                .order("check_in_time", false);
            let records: ReadOutcome<AttendanceRecord> = read(store, query).await;
            let rate = attendance_rate(records.rows());
            AttendanceView::Own { records, rate }
        }
        Role::Teacher => {
            let sessions = Query::table(Table::AttendanceSessions)
                .eq("teacher_id", profile.id.as_str())
                .order("created_at", false);
            let classes = Query::table(Table::Classes)
                .eq("teacher_id", profile.id.as_str())
                .order("class_name", true);
            let (sessions, classes) = futures::join!(read(store, sessions), read(store, classes));
            AttendanceView::Sessions { sessions, classes }
        }
        Role::Admin => {
            let query = Query::table(Table::Attendance).order("check_in_time", false);
            let records: ReadOutcome<AttendanceRecord> = read(store, query).await;
            let rate = attendance_rate(records.rows());
            AttendanceView::All { records, rate }
        }
    };
    Ok(view)
}

/// Every upcoming event, soonest first.
pub async fn load_events(store: &dyn DataStore, today: &str) -> ReadOutcome<EventRecord> {
    read(store, upcoming_events_query(today, None)).await
}

/// Profiles per role, for the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub students: usize,
    pub teachers: usize,
    pub admins: usize,
    pub unrecognized: usize,
}

impl RoleCounts {
    pub fn tally(profiles: &[Profile]) -> Self {
        profiles.iter().fold(Self::default(), |mut counts, p| {
            match p.role() {
                Some(Role::Student) => counts.students += 1,
                Some(Role::Teacher) => counts.teachers += 1,
                Some(Role::Admin) => counts.admins += 1,
                None => counts.unrecognized += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.students + self.teachers + self.admins + self.unrecognized
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminOverview {
    pub profiles: ReadOutcome<Profile>,
    pub counts: RoleCounts,
}

pub async fn load_admin_overview(
    store: &dyn DataStore,
    profile: &Profile,
) -> Result<AdminOverview, AppError> {
    require_role(profile, &[Role::Admin])?;
    let query = Query::table(Table::Profiles).order("name", true);
    let profiles: ReadOutcome<Profile> = read(store, query).await;
    let counts = RoleCounts::tally(profiles.rows());
    Ok(AdminOverview { profiles, counts })
}

/// Open a session for `class_id` with a fresh QR code.
#[tracing::instrument(skip(store, teacher), fields(teacher_id = %teacher.id))]
pub async fn start_attendance_session(
    store: &dyn DataStore,
    teacher: &Profile,
    class_id: &str,
) -> Result<AttendanceSession, AppError> {
    require_role(teacher, &[Role::Teacher, Role::Admin])?;
    let class_id = class_id.trim();
    if class_id.is_empty() {
        return Err(AppError::bad_request("Choose a class before starting a session"));
    }

    let insert = AttendanceSessionInsert {
        class_id: class_id.to_string(),
        teacher_id: teacher.id.clone(),
        qr_code: uuid::Uuid::new_v4().simple().to_string(),
        status: SESSION_ACTIVE.to_string(),
    };
    let session: AttendanceSession = insert_one(store, Table::AttendanceSessions, &insert).await?;
    tracing::info!(session_id = %session.id, "Attendance session started");
    Ok(session)
}

/// End one of the teacher's sessions so its code stops accepting check-ins.
#[tracing::instrument(skip(store, teacher), fields(teacher_id = %teacher.id))]
pub async fn close_attendance_session(
    store: &dyn DataStore,
    teacher: &Profile,
    session_id: &str,
) -> Result<AttendanceSession, AppError> {
    let role = require_role(teacher, &[Role::Teacher, Role::Admin])?;
    let mut target = Query::table(Table::AttendanceSessions).eq("id", session_id);
    if role == Role::Teacher {
        target = target.eq("teacher_id", teacher.id.as_str());
    }
    let patch = json!({
        "status": SESSION_CLOSED,
        "end_time": chrono::Utc::now().to_rfc3339(),
    });
    let rows = store.update(&target, patch).await?;
    decode_rows::<AttendanceSession>(Table::AttendanceSessions, rows)?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::not_found("Attendance session not found"))
}

/// Record the student as present for the session behind `qr_code`.
#[tracing::instrument(skip(store, student), fields(student_id = %student.id))]
pub async fn check_in(
    store: &dyn DataStore,
    student: &Profile,
    qr_code: &str,
) -> Result<AttendanceRecord, AppError> {
    require_role(student, &[Role::Student])?;
    let code = qr_code.trim();
    if code.is_empty() {
        return Err(AppError::bad_request("Enter or scan a QR code"));
    }

    let lookup = Query::table(Table::AttendanceSessions).eq("qr_code", code).limit(1);
    let session = select_as::<AttendanceSession>(store, &lookup)
        .await?
        .into_iter()
        .find(AttendanceSession::is_active)
        .ok_or_else(|| AppError::not_found("This QR code is not valid or the session has ended"))?;

    let existing = Query::table(Table::Attendance)
        .eq("session_id", session.id.as_str())
        .eq("student_id", student.id.as_str())
        .limit(1);
    if !store.select(&existing).await?.is_empty() {
        return Err(AppError::conflict("You have already checked in to this session"));
    }

    let insert = AttendanceInsert {
        session_id: session.id.clone(),
        student_id: student.id.clone(),
        status: STATUS_PRESENT.to_string(),
        location: None,
    };
    let record: AttendanceRecord = insert_one(store, Table::Attendance, &insert).await?;
    tracing::info!(session_id = %session.id, "Checked in");
    Ok(record)
}

/// Create an event as an admin. Title and date are required.
#[tracing::instrument(skip(store, profile, event), fields(profile_id = %profile.id))]
pub async fn create_event(
    store: &dyn DataStore,
    profile: &Profile,
    event: NewEvent,
) -> Result<EventRecord, AppError> {
    require_role(profile, &[Role::Admin])?;
    let event = event.normalized();
    event.validate_request()?;

    let insert = EventInsert {
        title: event.title,
        description: event.description,
        event_date: event.event_date,
        location: event.location,
        created_by: profile.user_id.clone(),
    };
    let created: EventRecord = insert_one(store, Table::Events, &insert).await?;
    tracing::info!(event_id = %created.id, "Event created");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{profile, profile_row, MemoryStore};
    use serde_json::json;
    use shared_types::AppErrorKind;

    fn teacher() -> Profile {
        profile("teacher-profile", "teacher-user", Role::Teacher)
    }

    fn student() -> Profile {
        profile("student-profile", "student-user", Role::Student)
    }

    fn admin() -> Profile {
        profile("admin-profile", "admin-user", Role::Admin)
    }

    #[tokio::test]
    async fn students_page_is_forbidden_for_students() {
        let store = MemoryStore::new();
        let err = load_students(&store, &student()).await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn students_page_degrades_on_failure() {
        let store = MemoryStore::new();
        store.fail_table(Table::Students);
        let outcome = load_students(&store, &teacher()).await.unwrap();
        assert!(outcome.is_failed());
        assert!(outcome.is_empty());
    }

    #[tokio::test]
    async fn student_tests_are_own_results() {
        let store = MemoryStore::new();
        store.seed(Table::Tests, vec![json!({
            "id": "t1", "created_by": "teacher-user", "test_name": "Algebra", "total_marks": 50
        })]);
        store.seed(Table::TestResults, vec![
            json!({"id": "r1", "test_id": "t1", "student_id": "student-profile", "marks_obtained": 40}),
            json!({"id": "r2", "test_id": "t1", "student_id": "someone-else", "marks_obtained": 10}),
        ]);
        match load_tests(&store, &student()).await.unwrap() {
            TestsView::Results(results) => {
                assert_eq!(results.len(), 1);
                assert_eq!(results.rows()[0].percentage(), Some(80));
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[tokio::test]
    async fn admin_overview_counts_roles() {
        let store = MemoryStore::new();
        store.seed(Table::Profiles, vec![
            profile_row("p1", "u1", "Ada", Role::Student),
            profile_row("p2", "u2", "Bea", Role::Student),
            profile_row("p3", "u3", "Cy", Role::Teacher),
            profile_row("p4", "u4", "Di", Role::Admin),
        ]);
        let overview = load_admin_overview(&store, &admin()).await.unwrap();
        assert_eq!(overview.counts, RoleCounts { students: 2, teachers: 1, admins: 1, unrecognized: 0 });
        assert_eq!(overview.counts.total(), 4);
        assert!(load_admin_overview(&store, &teacher()).await.is_err());
    }

    #[tokio::test]
    async fn session_then_check_in() {
        let store = MemoryStore::new();
        let session = start_attendance_session(&store, &teacher(), "class-1").await.unwrap();
        assert_eq!(session.status, "active");
        assert_eq!(session.qr_code.len(), 32);

        let record = check_in(&store, &student(), &format!(" {} ", session.qr_code)).await.unwrap();
        assert_eq!(record.status, "present");
        assert_eq!(record.session_id, session.id);

        let again = check_in(&store, &student(), &session.qr_code).await.unwrap_err();
        assert_eq!(again.kind, AppErrorKind::Conflict);
    }

    #[tokio::test]
    async fn closed_session_rejects_check_in() {
        let store = MemoryStore::new();
        let session = start_attendance_session(&store, &teacher(), "class-1").await.unwrap();
        let closed = close_attendance_session(&store, &teacher(), &session.id).await.unwrap();
        assert_eq!(closed.status, SESSION_CLOSED);

        let err = check_in(&store, &student(), &session.qr_code).await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::NotFound);
    }

    #[tokio::test]
    async fn blank_and_unknown_codes() {
        let store = MemoryStore::new();
        let blank = check_in(&store, &student(), "   ").await.unwrap_err();
        assert_eq!(blank.kind, AppErrorKind::BadRequest);
        let unknown = check_in(&store, &student(), "nope").await.unwrap_err();
        assert_eq!(unknown.kind, AppErrorKind::NotFound);
    }

    #[tokio::test]
    async fn blank_class_is_bad_request() {
        let store = MemoryStore::new();
        let err = start_attendance_session(&store, &teacher(), "").await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn create_event_requires_title_and_date() {
        let store = MemoryStore::new();
        let err = create_event(&store, &admin(), NewEvent {
            title: "  ".into(),
            ..NewEvent::default()
        })
        .await
        .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert!(err.field_errors.contains_key("title"));
        assert!(err.field_errors.contains_key("event_date"));
    }

    #[tokio::test]
    async fn create_event_stores_author() {
        let store = MemoryStore::new();
        let created = create_event(&store, &admin(), NewEvent {
            title: "Sports day".into(),
            event_date: "2024-05-01".into(),
            ..NewEvent::default()
        })
        .await
        .unwrap();
        assert_eq!(created.created_by, "admin-user");

        let events = load_events(&store, "2024-01-01").await;
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn teachers_cannot_create_events() {
        let store = MemoryStore::new();
        let err = create_event(&store, &teacher(), NewEvent::default()).await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Forbidden);
    }
}
