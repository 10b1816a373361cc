use shared_types::{attendance_rate, AttendanceRecord};

fn records(statuses: &[&str]) -> Vec<AttendanceRecord> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            serde_json::from_value(serde_json::json!({
                "id": format!("a{i}"),
                "session_id": "session-1",
                "student_id": "p1",
                "status": status,
            }))
            .unwrap()
        })
        .collect()
}

#[test]
fn no_records_is_zero() {
    assert_eq!(attendance_rate(&[]), 0);
}

#[test]
fn all_present_is_hundred() {
    assert_eq!(attendance_rate(&records(&["present", "present"])), 100);
}

#[test]
fn three_of_four_is_seventy_five() {
    assert_eq!(
        attendance_rate(&records(&["present", "absent", "present", "present"])),
        75
    );
}

#[test]
fn rate_is_rounded() {
    assert_eq!(attendance_rate(&records(&["present", "present", "late"])), 67);
    assert_eq!(attendance_rate(&records(&["present", "absent", "absent"])), 33);
}
