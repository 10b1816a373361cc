use crate::models::Role;
use crate::navigation::{AppPath, Icon};
use crate::records::{AttendanceRecord, EventRecord, TestRecord};
use serde::{Deserialize, Serialize};

/// Maximum number of tests listed under "recent tests".
pub const RECENT_TESTS_LIMIT: usize = 5;

/// Role-scoped numbers shown on the dashboard. Recomputed on every visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    /// Profile the underlying reads were issued for.
    pub profile_id: String,
    pub role: Option<Role>,
    pub total_students: usize,
    pub total_tests: usize,
    pub total_events: usize,
    pub attendance_rate: u32,
    pub recent_tests: Vec<TestRecord>,
    pub upcoming_events: Vec<EventRecord>,
    /// Number of reads that failed and were counted as empty.
    pub degraded_reads: usize,
}

impl DashboardSummary {
    pub fn empty(profile_id: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            profile_id: profile_id.into(),
            role,
            total_students: 0,
            total_tests: 0,
            total_events: 0,
            attendance_rate: 0,
            recent_tests: Vec::new(),
            upcoming_events: Vec::new(),
            degraded_reads: 0,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded_reads > 0
    }
}

/// `round(100 * present / total)`, or 0 for no records.
pub fn attendance_rate(records: &[AttendanceRecord]) -> u32 {
    if records.is_empty() {
        return 0;
    }
    let present = records.iter().filter(|r| r.is_present()).count();
    (100.0 * present as f64 / records.len() as f64).round() as u32
}

/// Colour family used for a card icon or action row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Success,
    Student,
    Teacher,
    Admin,
}

impl Tone {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Student => Tone::Student,
            Role::Teacher => Tone::Teacher,
            Role::Admin => Tone::Admin,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Primary => "tone-primary",
            Tone::Success => "tone-success",
            Tone::Student => "tone-student",
            Tone::Teacher => "tone-teacher",
            Tone::Admin => "tone-admin",
        }
    }
}

/// Which summary field a card displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    AttendanceRate,
    TotalStudents,
    TotalTests,
    TotalEvents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSpec {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: Icon,
    pub tone: Tone,
    pub metric: Metric,
}

impl CardSpec {
    const fn new(
        title: &'static str,
        description: &'static str,
        icon: Icon,
        tone: Tone,
        metric: Metric,
    ) -> Self {
        Self {
            title,
            description,
            icon,
            tone,
            metric,
        }
    }

    /// Rendered value for this card, e.g. `"75%"` or `"12"`.
    pub fn value(&self, summary: &DashboardSummary) -> String {
        match self.metric {
            Metric::AttendanceRate => format!("{}%", summary.attendance_rate),
            Metric::TotalStudents => summary.total_students.to_string(),
            Metric::TotalTests => summary.total_tests.to_string(),
            Metric::TotalEvents => summary.total_events.to_string(),
        }
    }
}

const STUDENT_CARDS: &[CardSpec] = &[
    CardSpec::new("My Attendance Rate", "Overall attendance", Icon::UserCheck, Tone::Success, Metric::AttendanceRate),
    CardSpec::new("Upcoming Events", "Events this month", Icon::Calendar, Tone::Primary, Metric::TotalEvents),
];

const TEACHER_CARDS: &[CardSpec] = &[
    CardSpec::new("Total Students", "Across all classes", Icon::Users, Tone::Student, Metric::TotalStudents),
    CardSpec::new("Tests Created", "This semester", Icon::FileText, Tone::Teacher, Metric::TotalTests),
    CardSpec::new("Upcoming Events", "Events this month", Icon::Calendar, Tone::Primary, Metric::TotalEvents),
];

const ADMIN_CARDS: &[CardSpec] = &[
    CardSpec::new("Total Students", "Enrolled students", Icon::Users, Tone::Student, Metric::TotalStudents),
    CardSpec::new("Total Tests", "All tests", Icon::FileText, Tone::Teacher, Metric::TotalTests),
    CardSpec::new("Overall Attendance", "System-wide", Icon::UserCheck, Tone::Success, Metric::AttendanceRate),
    CardSpec::new("Active Events", "Current events", Icon::Calendar, Tone::Primary, Metric::TotalEvents),
];

/// Stat cards for a role.
pub fn cards_for(role: Role) -> &'static [CardSpec] {
    match role {
        Role::Student => STUDENT_CARDS,
        Role::Teacher => TEACHER_CARDS,
        Role::Admin => ADMIN_CARDS,
    }
}

/// Stat cards for a raw role string; unknown roles get none.
pub fn cards_for_raw(role: &str) -> &'static [CardSpec] {
    Role::parse(role).map(cards_for).unwrap_or(&[])
}

/// Shortcut row in the "Quick Actions" card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub icon: Icon,
    pub tone: Tone,
    pub target: AppPath,
}

const STUDENT_ACTIONS: &[QuickAction] = &[
    QuickAction { label: "Scan QR for attendance", icon: Icon::QrCode, tone: Tone::Student, target: AppPath::QrScan },
    QuickAction { label: "View test results", icon: Icon::FileText, tone: Tone::Primary, target: AppPath::Tests },
];

const TEACHER_ACTIONS: &[QuickAction] = &[
    QuickAction { label: "Start attendance session", icon: Icon::UserCheck, tone: Tone::Teacher, target: AppPath::Attendance },
    QuickAction { label: "Create new test", icon: Icon::FileText, tone: Tone::Primary, target: AppPath::Tests },
];

const ADMIN_ACTIONS: &[QuickAction] = &[
    QuickAction { label: "Manage students", icon: Icon::Users, tone: Tone::Admin, target: AppPath::Students },
    QuickAction { label: "Create events", icon: Icon::Calendar, tone: Tone::Primary, target: AppPath::Events },
];

pub fn quick_actions_for(role: Role) -> &'static [QuickAction] {
    match role {
        Role::Student => STUDENT_ACTIONS,
        Role::Teacher => TEACHER_ACTIONS,
        Role::Admin => ADMIN_ACTIONS,
    }
}

/// "Good morning, Ada!" for hours before noon, afternoon until 18:00.
pub fn greeting_for_hour(hour: u32, name: &str) -> String {
    let greeting = if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    };
    format!("{greeting}, {name}!")
}

pub fn welcome_subtitle(role: Role) -> String {
    format!(
        "Welcome to your {} dashboard. Here's your overview for today.",
        role.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(status: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: "a".into(),
            session_id: "s".into(),
            student_id: "p".into(),
            status: status.into(),
            attendance_date: String::new(),
            check_in_time: String::new(),
            location: None,
            latitude: None,
            longitude: None,
            created_at: String::new(),
            attendance_sessions: None,
        }
    }

    #[test]
    fn attendance_rate_empty_is_zero() {
        assert_eq!(attendance_rate(&[]), 0);
    }

    #[test]
    fn attendance_rate_all_present() {
        let records = vec![record("present"), record("present")];
        assert_eq!(attendance_rate(&records), 100);
    }

    #[test]
    fn attendance_rate_three_of_four() {
        let records = vec![
            record("present"),
            record("present"),
            record("absent"),
            record("present"),
        ];
        assert_eq!(attendance_rate(&records), 75);
    }

    #[test]
    fn attendance_rate_rounds() {
        let records = vec![record("present"), record("present"), record("late")];
        assert_eq!(attendance_rate(&records), 67);
    }

    #[test]
    fn card_tables_per_role() {
        let titles = |role| cards_for(role).iter().map(|c| c.title).collect::<Vec<_>>();
        assert_eq!(titles(Role::Student), vec!["My Attendance Rate", "Upcoming Events"]);
        assert_eq!(
            titles(Role::Teacher),
            vec!["Total Students", "Tests Created", "Upcoming Events"]
        );
        assert_eq!(
            titles(Role::Admin),
            vec!["Total Students", "Total Tests", "Overall Attendance", "Active Events"]
        );
    }

    #[test]
    fn raw_unknown_role_has_no_cards() {
        assert!(cards_for_raw("parent").is_empty());
        assert_eq!(cards_for_raw("Admin").len(), 4);
    }

    #[test]
    fn card_values_render_from_summary() {
        let mut summary = DashboardSummary::empty("p1", Some(Role::Admin));
        summary.total_students = 12;
        summary.attendance_rate = 75;
        let cards = cards_for(Role::Admin);
        assert_eq!(cards[0].value(&summary), "12");
        assert_eq!(cards[2].value(&summary), "75%");
        assert_eq!(cards[3].value(&summary), "0");
    }

    #[test]
    fn quick_actions_per_role() {
        assert_eq!(quick_actions_for(Role::Student)[0].label, "Scan QR for attendance");
        assert_eq!(quick_actions_for(Role::Teacher)[1].label, "Create new test");
        assert_eq!(quick_actions_for(Role::Admin)[1].target, AppPath::Events);
    }

    #[test]
    fn greeting_boundaries() {
        assert_eq!(greeting_for_hour(0, "Ada"), "Good morning, Ada!");
        assert_eq!(greeting_for_hour(11, "Ada"), "Good morning, Ada!");
        assert_eq!(greeting_for_hour(12, "Ada"), "Good afternoon, Ada!");
        assert_eq!(greeting_for_hour(17, "Ada"), "Good afternoon, Ada!");
        assert_eq!(greeting_for_hour(18, "Ada"), "Good evening, Ada!");
    }

    #[test]
    fn welcome_subtitle_uses_lowercase_role() {
        assert_eq!(
            welcome_subtitle(Role::Teacher),
            "Welcome to your teacher dashboard. Here's your overview for today."
        );
    }
}
