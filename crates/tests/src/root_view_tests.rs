use crate::common::school;
use backend::view::PROFILE_MISSING_MESSAGE;
use backend::testing::{MemoryAuth, MemoryStore};
use backend::{
    resolve_profile, root_view, AuthProvider, DataStore, ProfileLookup, RootView, SessionResolver,
    Table,
};
use shared_types::{Role, SignInRequest};

async fn view_after_mount(auth: &dyn AuthProvider, store: &dyn DataStore) -> RootView {
    let mounted = SessionResolver::mount(auth).await;
    let lookup = match &mounted.initial {
        Some(identity) => resolve_profile(store, identity).await,
        None => ProfileLookup::Loading,
    };
    root_view(auth.sessions().is_resolved(), mounted.initial.as_ref(), &lookup)
}

#[test]
fn nothing_renders_before_resolution() {
    assert_eq!(root_view(false, None, &ProfileLookup::Loading), RootView::Resolving);
}

#[tokio::test]
async fn no_session_shows_auth_form() {
    let school = school();
    let view = view_after_mount(&school.auth, school.store.as_ref()).await;
    assert_eq!(view, RootView::SignedOut);
}

#[tokio::test]
async fn session_without_profile_is_terminal() {
    // Not linked to the store, so signing up creates no profile row.
    let auth = MemoryAuth::new();
    let store = MemoryStore::new();
    auth.register("ghost@school.test", "secret1", "Ghost", Role::Student);
    auth.sign_in(&SignInRequest {
        email: "ghost@school.test".into(),
        password: "secret1".into(),
    })
    .await
    .unwrap();

    let view = view_after_mount(&auth, &store).await;
    assert_eq!(view, RootView::ProfileMissing);
    assert_eq!(PROFILE_MISSING_MESSAGE, "Profile not found. Please contact support.");
}

#[tokio::test]
async fn failed_profile_read_is_treated_as_missing() {
    let school = school();
    school.auth.register("p@school.test", "secret1", "Pat", Role::Student);
    school.store.fail_table(Table::Profiles);
    school
        .auth
        .sign_in(&SignInRequest {
            email: "p@school.test".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap();

    let view = view_after_mount(&school.auth, school.store.as_ref()).await;
    assert_eq!(view, RootView::ProfileMissing);
}

#[tokio::test]
async fn session_with_profile_shows_dashboard_for_role() {
    let school = school();
    let user_id = school.auth.register("t@school.test", "secret1", "Ms T", Role::Teacher);
    school
        .auth
        .sign_in(&SignInRequest {
            email: "t@school.test".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap();

    match view_after_mount(&school.auth, school.store.as_ref()).await {
        RootView::Ready(profile) => {
            assert_eq!(profile.user_id, user_id);
            assert_eq!(profile.role(), Some(Role::Teacher));
        }
        other => panic!("expected dashboard, got {other:?}"),
    }
}
