//! Rows of the backend tables this client reads and writes.
//!
//! Dates and timestamps stay as the strings the backend returns. Fields the
//! backend fills in on insert are `#[serde(default)]` so partial rows parse.

use serde::{Deserialize, Serialize};

/// Attendance status counted as present.
pub const STATUS_PRESENT: &str = "present";
/// Attendance session status that accepts check-ins.
pub const SESSION_ACTIVE: &str = "active";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub enrollment_number: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Teacher {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassRecord {
    pub id: String,
    pub class_name: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub teacher_id: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceSession {
    pub id: String,
    pub class_id: String,
    pub teacher_id: String,
    pub qr_code: String,
    #[serde(default)]
    pub session_date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    pub status: String,
    #[serde(default)]
    pub created_at: String,
}

impl AttendanceSession {
    pub fn is_active(&self) -> bool {
        self.status == SESSION_ACTIVE && self.end_time.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub id: String,
    pub session_id: String,
    pub student_id: String,
    pub status: String,
    #[serde(default)]
    pub attendance_date: String,
    #[serde(default)]
    pub check_in_time: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub created_at: String,
    /// Present when selected with `*, attendance_sessions(*)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance_sessions: Option<AttendanceSession>,
}

impl AttendanceRecord {
    pub fn is_present(&self) -> bool {
        self.status == STATUS_PRESENT
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TestRecord {
    pub id: String,
    #[serde(default)]
    pub class_id: String,
    pub created_by: String,
    #[serde(default)]
    pub subject: String,
    pub test_name: String,
    #[serde(default)]
    pub test_date: String,
    #[serde(default)]
    pub total_marks: i32,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestResult {
    pub id: String,
    pub test_id: String,
    pub student_id: String,
    #[serde(default)]
    pub marks_obtained: f64,
    #[serde(default)]
    pub created_at: String,
    /// Present when selected with `*, tests(*)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<TestRecord>,
}

impl TestResult {
    /// Score as a whole percentage of the test's total marks, when known.
    pub fn percentage(&self) -> Option<u32> {
        let total = self.tests.as_ref()?.total_marks;
        if total <= 0 {
            return None;
        }
        Some((100.0 * self.marks_obtained / f64::from(total)).round().max(0.0) as u32)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub event_date: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_at: String,
}

/// Insert payload for `attendance_sessions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceSessionInsert {
    pub class_id: String,
    pub teacher_id: String,
    pub qr_code: String,
    pub status: String,
}

/// Insert payload for `attendance`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceInsert {
    pub session_id: String,
    pub student_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Insert payload for `events`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventInsert {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub event_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_by: String,
}
