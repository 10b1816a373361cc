use pretty_assertions::assert_eq;
use shared_types::{cards_for, cards_for_raw, navigation_for, navigation_for_raw, AppPath, FeatureFlags, Role};

fn labels(role: Role) -> Vec<&'static str> {
    navigation_for(role).iter().map(|i| i.label).collect()
}

#[test]
fn each_role_gets_its_sidebar() {
    assert_eq!(
        labels(Role::Student),
        vec!["Dashboard", "My Attendance", "My Tests", "Events", "QR Scan"]
    );
    assert_eq!(
        labels(Role::Teacher),
        vec!["Dashboard", "Students", "Tests", "Attendance", "Events"]
    );
    assert_eq!(
        labels(Role::Admin),
        vec!["Dashboard", "Students", "Tests", "Attendance", "Events", "Admin Panel"]
    );
}

#[test]
fn tables_are_stable_across_calls() {
    for role in Role::ALL {
        assert_eq!(navigation_for(role), navigation_for(role));
        assert_eq!(cards_for(role), cards_for(role));
    }
}

#[test]
fn card_titles_per_role() {
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
fn unknown_role_gets_nothing() {
    assert!(navigation_for_raw("janitor").is_empty());
    assert!(cards_for_raw("janitor").is_empty());
    assert_eq!(navigation_for_raw(" Teacher ").len(), 5);
}

#[test]
fn qr_scan_entry_can_be_switched_off() {
    let flags = FeatureFlags {
        qr_scan: false,
        ..FeatureFlags::default()
    };
    let visible: Vec<_> = navigation_for(Role::Student)
        .iter()
        .filter(|i| i.enabled(&flags))
        .map(|i| i.path)
        .collect();
    assert!(!visible.contains(&AppPath::QrScan));
    assert_eq!(visible.len(), 4);
}
