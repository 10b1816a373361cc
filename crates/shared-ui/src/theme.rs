use dioxus::prelude::*;
use shared_types::Role;

/// `data-role` value that selects a role's accent colours.
pub fn accent_key(role: Option<Role>) -> &'static str {
    match role {
        Some(role) => role.as_str(),
        None => "none",
    }
}

/// Class for the small role chip in the sidebar header.
pub fn role_chip_class(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Student) => "role-chip role-student",
        Some(Role::Teacher) => "role-chip role-teacher",
        Some(Role::Admin) => "role-chip role-admin",
        None => "role-chip role-none",
    }
}

/// Apply a role's accent to the document root.
pub fn set_role_accent(role: Option<Role>) {
    let key = accent_key(role);
    document::eval(&format!(
        r#"document.documentElement.setAttribute('data-role', '{key}');"#
    ));
}

/// Keeps the document accent in sync with `role` while mounted.
#[component]
pub fn RoleAccent(role: Option<Role>) -> Element {
    use_effect(use_reactive!(|role| set_role_accent(role)));
    rsx! {}
}
