//! Role-scoped dashboard reads and their reduction to a summary.

use crate::query::{Query, Table};
use crate::store::{select_as, DataStore};
use serde::de::DeserializeOwned;
use shared_types::{
    attendance_rate, AppError, AttendanceRecord, DashboardSummary, EventRecord, Profile, Role,
    Student, TestRecord, RECENT_TESTS_LIMIT,
};

/// Upcoming events shown on a dashboard.
pub const DASHBOARD_EVENTS_LIMIT: usize = 5;
/// Attendance records read for a student's own rate.
pub const STUDENT_ATTENDANCE_LIMIT: usize = 10;

/// Outcome of one read in a fan-out. A failure never aborts the others.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<T> {
    Loaded(Vec<T>),
    Failed(AppError),
}

impl<T> ReadOutcome<T> {
    /// Wrap a read result, logging failures against the table.
    pub fn from_result(table: Table, result: Result<Vec<T>, AppError>) -> Self {
        match result {
            Ok(rows) => ReadOutcome::Loaded(rows),
            Err(e) => {
                tracing::warn!(table = table.as_str(), error = %e, "Read failed, counting as empty");
                ReadOutcome::Failed(e)
            }
        }
    }

    /// Loaded rows, or nothing for a failed read.
    pub fn rows(&self) -> &[T] {
        match self {
            ReadOutcome::Loaded(rows) => rows,
            ReadOutcome::Failed(_) => &[],
        }
    }

    pub fn into_rows(self) -> Vec<T> {
        match self {
            ReadOutcome::Loaded(rows) => rows,
            ReadOutcome::Failed(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ReadOutcome::Failed(_))
    }
}

pub(crate) async fn read<T: DeserializeOwned>(store: &dyn DataStore, query: Query) -> ReadOutcome<T> {
    ReadOutcome::from_result(query.table, select_as(store, &query).await)
}

/// Events on or after `today`, soonest first.
pub fn upcoming_events_query(today: &str, limit: Option<usize>) -> Query {
    let query = Query::table(Table::Events)
        .gte("event_date", today)
        .order("event_date", true);
    match limit {
        Some(n) => query.limit(n),
        None => query,
    }
}

/// The reads a role issued. `None` means the role does not read that set.
#[derive(Debug, Default)]
pub struct DashboardReads {
    pub students: Option<ReadOutcome<Student>>,
    pub tests: Option<ReadOutcome<TestRecord>>,
    pub events: Option<ReadOutcome<EventRecord>>,
    pub attendance: Option<ReadOutcome<AttendanceRecord>>,
}

impl DashboardReads {
    fn failures(&self) -> usize {
        [
            self.students.as_ref().map(ReadOutcome::is_failed),
            self.tests.as_ref().map(ReadOutcome::is_failed),
            self.events.as_ref().map(ReadOutcome::is_failed),
            self.attendance.as_ref().map(ReadOutcome::is_failed),
        ]
        .into_iter()
        .filter(|failed| *failed == Some(true))
        .count()
    }
}

/// Fold reads into a summary.
///
/// Unread and failed sets both count as empty; failures are tallied in
/// `degraded_reads`. Roles that do not read attendance report a rate of 0.
pub fn summarize(profile_id: &str, role: Option<Role>, reads: DashboardReads) -> DashboardSummary {
    let degraded_reads = reads.failures();
    let mut summary = DashboardSummary::empty(profile_id, role);

    summary.total_students = reads.students.as_ref().map_or(0, ReadOutcome::len);
    summary.attendance_rate = reads
        .attendance
        .as_ref()
        .map_or(0, |a| attendance_rate(a.rows()));

    if let Some(tests) = reads.tests {
        summary.total_tests = tests.len();
        summary.recent_tests = tests.into_rows().into_iter().take(RECENT_TESTS_LIMIT).collect();
    }
    if let Some(events) = reads.events {
        summary.total_events = events.len();
        summary.upcoming_events = events.into_rows();
    }
    summary.degraded_reads = degraded_reads;
    summary
}

/// Load the dashboard for `profile` as of today.
pub async fn fetch_dashboard(store: &dyn DataStore, profile: &Profile) -> DashboardSummary {
    fetch_dashboard_on(store, profile, &crate::today()).await
}

/// Load the dashboard with an explicit `today` (`YYYY-MM-DD`).
#[tracing::instrument(skip(store, profile), fields(profile_id = %profile.id, role = %profile.raw_role))]
pub async fn fetch_dashboard_on(store: &dyn DataStore, profile: &Profile, today: &str) -> DashboardSummary {
    let role = profile.role();
    let upcoming = || upcoming_events_query(today, Some(DASHBOARD_EVENTS_LIMIT));

    let reads = match role {
        Some(Role::Student) => {
            let own_attendance = Query::table(Table::Attendance)
                .select("*, attendance_sessions(*)")
                .eq("student_id", profile.id.as_str())
                .limit(STUDENT_ATTENDANCE_LIMIT);
            let (events, attendance) =
                futures::join!(read(store, upcoming()), read(store, own_attendance));
            DashboardReads {
                events: Some(events),
                attendance: Some(attendance),
                ..DashboardReads::default()
            }
        }
        Some(Role::Teacher) => {
            let own_tests = Query::table(Table::Tests).eq("created_by", profile.user_id.as_str());
            let (students, tests, events) = futures::join!(
                read(store, Query::table(Table::Students)),
                read(store, own_tests),
                read(store, upcoming()),
            );
            DashboardReads {
                students: Some(students),
                tests: Some(tests),
                events: Some(events),
                attendance: None,
            }
        }
        Some(Role::Admin) => {
            let (students, tests, events, attendance) = futures::join!(
                read(store, Query::table(Table::Students)),
                read(store, Query::table(Table::Tests)),
                read(store, upcoming()),
                read(store, Query::table(Table::Attendance)),
            );
            DashboardReads {
                students: Some(students),
                tests: Some(tests),
                events: Some(events),
                attendance: Some(attendance),
            }
        }
        None => {
            tracing::warn!("Unrecognized role, dashboard has nothing to load");
            DashboardReads::default()
        }
    };

    let summary = summarize(&profile.id, role, reads);
    if summary.is_degraded() {
        tracing::warn!(degraded_reads = summary.degraded_reads, "Dashboard loaded with failed reads");
    }
    summary
}

/// Drops summaries that arrive for a profile other than the current one.
#[derive(Debug, Clone, Default)]
pub struct DashboardGuard {
    current: Option<String>,
}

impl DashboardGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the profile whose dashboard is now wanted.
    pub fn track(&mut self, profile_id: impl Into<String>) {
        self.current = Some(profile_id.into());
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn accept(&self, summary: DashboardSummary) -> Option<DashboardSummary> {
        if self.current.as_deref() == Some(summary.profile_id.as_str()) {
            Some(summary)
        } else {
            tracing::debug!(
                stale_profile = %summary.profile_id,
                current = ?self.current,
                "Discarding stale dashboard"
            );
            None
        }
    }
}
