use serde::{Deserialize, Serialize};
use std::fmt;

/// The three roles a profile can hold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Admin];

    /// Case-insensitive parse. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" => Some(Role::Student),
            "teacher" => Some(Role::Teacher),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Lowercase string as stored in the `profiles.role` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Admin => "Admin",
        }
    }

    /// Badge shown in the dashboard header.
    pub fn dashboard_badge(&self) -> String {
        format!("{} Dashboard", self.label())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated user handle issued by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Token pair plus the identity it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Unix seconds. Zero means unknown.
    #[serde(default)]
    pub expires_at: i64,
    pub user: Identity,
}

impl Session {
    /// True once the access token can no longer be used at `now` (unix seconds).
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at > 0 && self.expires_at <= now
    }
}

/// A row of the `profiles` table.
///
/// `role` is kept as the raw column value so that a profile carrying an
/// unexpected role still loads; use [`Profile::role`] to interpret it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "role")]
    pub raw_role: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Profile {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.raw_role)
    }

    /// Single-letter avatar fallback for the sidebar.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::parse("Teacher"), Some(Role::Teacher));
        assert_eq!(Role::parse(" ADMIN "), Some(Role::Admin));
        assert_eq!(Role::parse("student"), Some(Role::Student));
    }

    #[test]
    fn parse_unknown_is_none() {
        assert_eq!(Role::parse("janitor"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn as_str_matches_parse() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn dashboard_badge_capitalizes() {
        assert_eq!(Role::Teacher.dashboard_badge(), "Teacher Dashboard");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn profile_keeps_unknown_role() {
        let profile: Profile = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "user_id": "u1",
            "name": "ada",
            "email": "ada@school.test",
            "phone": null,
            "role": "principal",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(profile.role(), None);
        assert_eq!(profile.raw_role, "principal");
        assert_eq!(profile.initial(), "A");
    }

    #[test]
    fn session_expiry() {
        let session = Session {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_at: 100,
            user: Identity { id: "u1".into(), email: None },
        };
        assert!(!session.is_expired(99));
        assert!(session.is_expired(100));

        let unknown = Session { expires_at: 0, ..session };
        assert!(!unknown.is_expired(i64::MAX));
    }
}
