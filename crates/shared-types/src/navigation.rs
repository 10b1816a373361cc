use crate::feature_flags::FeatureFlags;
use crate::models::Role;
use serde::{Deserialize, Serialize};

/// Icons referenced by the static tables. The UI maps each to a glyph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Icon {
    GraduationCap,
    Users,
    FileText,
    Calendar,
    QrCode,
    UserCheck,
    Settings,
}

/// Pages reachable from the sidebar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AppPath {
    Dashboard,
    Students,
    Tests,
    Attendance,
    Events,
    QrScan,
    Admin,
}

impl AppPath {
    pub fn as_path(&self) -> &'static str {
        match self {
            AppPath::Dashboard => "/dashboard",
            AppPath::Students => "/students",
            AppPath::Tests => "/tests",
            AppPath::Attendance => "/attendance",
            AppPath::Events => "/events",
            AppPath::QrScan => "/qr-scan",
            AppPath::Admin => "/admin",
        }
    }

    /// Match a location path, ignoring a trailing slash and any query.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        match path {
            "/dashboard" => Some(AppPath::Dashboard),
            "/students" => Some(AppPath::Students),
            "/tests" => Some(AppPath::Tests),
            "/attendance" => Some(AppPath::Attendance),
            "/events" => Some(AppPath::Events),
            "/qr-scan" => Some(AppPath::QrScan),
            "/admin" => Some(AppPath::Admin),
            _ => None,
        }
    }
}

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: AppPath,
    pub icon: Icon,
}

impl NavItem {
    const fn new(label: &'static str, path: AppPath, icon: Icon) -> Self {
        Self { label, path, icon }
    }

    pub fn enabled(&self, flags: &FeatureFlags) -> bool {
        match self.path {
            AppPath::QrScan => flags.qr_scan,
            _ => true,
        }
    }
}

const STUDENT_NAV: &[NavItem] = &[
    NavItem::new("Dashboard", AppPath::Dashboard, Icon::GraduationCap),
    NavItem::new("My Attendance", AppPath::Attendance, Icon::UserCheck),
    NavItem::new("My Tests", AppPath::Tests, Icon::FileText),
    NavItem::new("Events", AppPath::Events, Icon::Calendar),
    NavItem::new("QR Scan", AppPath::QrScan, Icon::QrCode),
];

const TEACHER_NAV: &[NavItem] = &[
    NavItem::new("Dashboard", AppPath::Dashboard, Icon::GraduationCap),
    NavItem::new("Students", AppPath::Students, Icon::Users),
    NavItem::new("Tests", AppPath::Tests, Icon::FileText),
    NavItem::new("Attendance", AppPath::Attendance, Icon::UserCheck),
    NavItem::new("Events", AppPath::Events, Icon::Calendar),
];

const ADMIN_NAV: &[NavItem] = &[
    NavItem::new("Dashboard", AppPath::Dashboard, Icon::GraduationCap),
    NavItem::new("Students", AppPath::Students, Icon::Users),
    NavItem::new("Tests", AppPath::Tests, Icon::FileText),
    NavItem::new("Attendance", AppPath::Attendance, Icon::UserCheck),
    NavItem::new("Events", AppPath::Events, Icon::Calendar),
    NavItem::new("Admin Panel", AppPath::Admin, Icon::Settings),
];

/// Sidebar entries for a role.
pub fn navigation_for(role: Role) -> &'static [NavItem] {
    match role {
        Role::Student => STUDENT_NAV,
        Role::Teacher => TEACHER_NAV,
        Role::Admin => ADMIN_NAV,
    }
}

/// Sidebar entries for a raw role string; unknown roles get none.
pub fn navigation_for_raw(role: &str) -> &'static [NavItem] {
    Role::parse(role).map(navigation_for).unwrap_or(&[])
}

/// Whether a role may open a page at all.
pub fn role_can_visit(role: Role, path: AppPath) -> bool {
    path == AppPath::Dashboard || navigation_for(role).iter().any(|item| item.path == path)
}
