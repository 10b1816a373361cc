use crate::common::school;
use backend::{sign_out_with_notice, AuthProvider, SessionResolver};
use pretty_assertions::assert_eq;
use shared_types::{Identity, Notice, Role, Session, SignInRequest};

fn sign_in_request(email: &str) -> SignInRequest {
    SignInRequest {
        email: email.into(),
        password: "secret1".into(),
    }
}

#[tokio::test]
async fn failed_initial_fetch_continues_signed_out() {
    let school = school();
    school.auth.fail_get_session(true);

    let mounted = SessionResolver::mount(&school.auth).await;
    assert_eq!(mounted.initial, None);
    assert!(school.auth.sessions().is_resolved());
}

#[tokio::test]
async fn stored_session_is_restored_on_mount() {
    let school = school();
    let identity = Identity {
        id: "user-1".into(),
        email: Some("a@school.test".into()),
    };
    school.auth.restore(Session {
        access_token: "token".into(),
        refresh_token: "refresh".into(),
        expires_at: 0,
        user: identity.clone(),
    });

    let mounted = SessionResolver::mount(&school.auth).await;
    assert_eq!(mounted.initial, Some(identity.clone()));
    assert_eq!(mounted.subscription.identity(), Some(identity));
}

#[tokio::test]
async fn subscribers_see_each_identity_change_once() {
    let school = school();
    let user_id = school.auth.register("a@school.test", "secret1", "Ann", Role::Student);
    let mut mounted = SessionResolver::mount(&school.auth).await;

    school.auth.sign_in(&sign_in_request("a@school.test")).await.unwrap();
    let signed_in = mounted.subscription.changed().await.unwrap();
    assert_eq!(signed_in.map(|i| i.id), Some(user_id));

    // Same user, new tokens: no notification.
    school.auth.refresh_session().await.unwrap();
    school.auth.sign_out().await.unwrap();
    assert_eq!(mounted.subscription.changed().await, Some(None));
}

#[tokio::test]
async fn sign_out_produces_notice() {
    let school = school();
    school.auth.register("a@school.test", "secret1", "Ann", Role::Student);
    school.auth.sign_in(&sign_in_request("a@school.test")).await.unwrap();

    let notice = sign_out_with_notice(&school.auth).await;
    assert_eq!(notice, Some(Notice::signed_out()));
    assert_eq!(school.auth.sessions().current(), None);
}

#[tokio::test]
async fn failed_sign_out_is_silent_but_local() {
    let school = school();
    school.auth.register("a@school.test", "secret1", "Ann", Role::Student);
    school.auth.sign_in(&sign_in_request("a@school.test")).await.unwrap();
    school.auth.fail_sign_out(true);

    assert_eq!(sign_out_with_notice(&school.auth).await, None);
    assert_eq!(school.auth.sessions().current(), None);
}

/// Publishes the sign-out before the logout request settles, the way the
/// hosted client drops its local session first.
struct SlowLogout {
    inner: backend::testing::MemoryAuth,
    released: tokio::sync::Notify,
}

#[async_trait::async_trait(?Send)]
impl AuthProvider for SlowLogout {
    async fn sign_up(&self, request: &shared_types::SignUpRequest) -> Result<(), shared_types::AppError> {
        self.inner.sign_up(request).await
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<Session, shared_types::AppError> {
        self.inner.sign_in(request).await
    }

    async fn sign_out(&self) -> Result<(), shared_types::AppError> {
        self.inner.sign_out().await?;
        self.released.notified().await;
        Ok(())
    }

    async fn get_session(&self) -> Result<Option<Session>, shared_types::AppError> {
        self.inner.get_session().await
    }

    async fn refresh_session(&self) -> Result<Session, shared_types::AppError> {
        self.inner.refresh_session().await
    }

    fn sessions(&self) -> &backend::SessionProvider {
        self.inner.sessions()
    }
}

#[tokio::test]
async fn sign_out_notice_arrives_after_subscribers_see_signed_out() {
    let auth = SlowLogout {
        inner: backend::testing::MemoryAuth::new(),
        released: tokio::sync::Notify::new(),
    };
    auth.inner.register("a@school.test", "secret1", "Ann", Role::Student);
    auth.sign_in(&sign_in_request("a@school.test")).await.unwrap();
    let mut subscription = auth.subscribe();
    let order = std::cell::RefCell::new(Vec::new());

    let gate = async {
        assert_eq!(subscription.changed().await, Some(None));
        order.borrow_mut().push("signed out");
        auth.released.notify_one();
    };
    let logout = async {
        let notice = sign_out_with_notice(&auth).await;
        order.borrow_mut().push("notice");
        notice
    };
    let ((), notice) = tokio::join!(gate, logout);

    assert_eq!(notice, Some(Notice::signed_out()));
    assert_eq!(order.into_inner(), vec!["signed out", "notice"]);
}
