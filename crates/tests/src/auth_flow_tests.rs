use crate::common::{school, sign_up_form};
use backend::{submit_auth, AuthProvider};
use pretty_assertions::assert_eq;
use shared_types::{AuthFormState, AuthMode, Notice, Role};

const ORIGIN: &str = "https://class.example";

#[tokio::test]
async fn sign_up_then_sign_in_with_same_credentials() {
    let school = school();
    let mut form = sign_up_form("new@school.test", "secret1", "Nia", Role::Teacher);

    let notice = submit_auth(&school.auth, &mut form, ORIGIN).await;
    assert_eq!(notice, Some(Notice::signed_up()));
    assert_eq!(form.mode, AuthMode::SignIn);
    assert!(!form.submitting);

    let sent = school.auth.last_sign_up().unwrap();
    assert_eq!(sent.email_redirect_to, "https://class.example/");
    assert_eq!(sent.metadata.name, "Nia");
    assert_eq!(sent.metadata.role, Role::Teacher);

    let notice = submit_auth(&school.auth, &mut form, ORIGIN).await;
    assert_eq!(notice, Some(Notice::signed_in()));
    let identity = school.auth.sessions().identity().unwrap();
    assert_eq!(identity.email.as_deref(), Some("new@school.test"));
}

#[tokio::test]
async fn sign_up_creates_profile_row() {
    let school = school();
    let mut form = sign_up_form("new@school.test", "secret1", "Nia", Role::Student);
    submit_auth(&school.auth, &mut form, ORIGIN).await;

    let profiles = school.store.rows(backend::Table::Profiles);
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["name"], "Nia");
    assert_eq!(profiles[0]["role"], "student");
}

#[tokio::test]
async fn failure_keeps_form_editable_with_provider_message() {
    let school = school();
    let mut form = AuthFormState {
        email: "nobody@school.test".into(),
        password: "wrong-pass".into(),
        ..AuthFormState::default()
    };

    let notice = submit_auth(&school.auth, &mut form, ORIGIN).await.unwrap();
    assert!(notice.is_destructive());
    assert_eq!(notice.title, "Authentication failed");
    assert_eq!(notice.description, "Invalid login credentials");
    assert_eq!(form.mode, AuthMode::SignIn);
    assert!(!form.submitting);
    assert_eq!(form.email, "nobody@school.test");
}

#[tokio::test]
async fn short_password_is_left_to_the_provider() {
    let school = school();
    let mut form = sign_up_form("new@school.test", "abc", "Nia", Role::Student);

    let notice = submit_auth(&school.auth, &mut form, ORIGIN).await.unwrap();
    assert!(notice.is_destructive());
    assert_eq!(notice.description, "Password should be at least 6 characters.");
    assert_eq!(form.mode, AuthMode::SignUp);
}

#[tokio::test]
async fn submit_in_flight_is_ignored() {
    let school = school();
    let mut form = AuthFormState {
        submitting: true,
        ..AuthFormState::default()
    };
    assert_eq!(submit_auth(&school.auth, &mut form, ORIGIN).await, None);
}

#[test]
fn toggling_mode_keeps_credentials_and_shows_profile_fields() {
    let mut form = AuthFormState {
        email: "a@school.test".into(),
        password: "secret1".into(),
        ..AuthFormState::default()
    };
    assert!(!form.shows_profile_fields());

    form.toggle_mode();
    assert!(form.shows_profile_fields());
    assert_eq!(form.submit_label(), "Create Account");
    assert_eq!(form.email, "a@school.test");
    assert_eq!(form.password, "secret1");

    form.toggle_mode();
    assert!(!form.shows_profile_fields());
    assert_eq!(form.submit_label(), "Sign In");
    assert_eq!(form.password, "secret1");
}
