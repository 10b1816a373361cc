use crate::session::{SessionProvider, SessionSubscription};
use async_trait::async_trait;
use shared_types::{AppError, AuthFormState, AuthMode, Notice, Session, SignInRequest, SignUpRequest};

/// Managed authentication service.
#[async_trait(?Send)]
pub trait AuthProvider {
    /// Create an account. The user still has to sign in afterwards.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), AppError>;

    async fn sign_in(&self, request: &SignInRequest) -> Result<Session, AppError>;

    async fn sign_out(&self) -> Result<(), AppError>;

    /// Current session, restoring it from storage and refreshing an expired
    /// access token when needed.
    async fn get_session(&self) -> Result<Option<Session>, AppError>;

    async fn refresh_session(&self) -> Result<Session, AppError>;

    /// The provider this client publishes sessions to.
    fn sessions(&self) -> &SessionProvider;

    fn subscribe(&self) -> SessionSubscription {
        self.sessions().subscribe()
    }
}

/// Submit the authentication form and produce the notice to show.
///
/// Returns `None` when a submit is already in flight.
pub async fn submit_auth(
    auth: &dyn AuthProvider,
    form: &mut AuthFormState,
    origin: &str,
) -> Option<Notice> {
    if !form.begin_submit() {
        return None;
    }

    let result = match form.mode {
        AuthMode::SignUp => auth
            .sign_up(&form.sign_up_request(origin))
            .await
            .map(|()| Notice::signed_up()),
        AuthMode::SignIn => auth
            .sign_in(&form.sign_in_request())
            .await
            .map(|_| Notice::signed_in()),
    };

    let notice = match result {
        Ok(notice) => {
            tracing::info!(mode = ?form.mode, "Authentication succeeded");
            notice
        }
        Err(e) => {
            tracing::warn!(mode = ?form.mode, error = %e, "Authentication failed");
            Notice::auth_failed(e.message)
        }
    };
    form.finish_submit(!notice.is_destructive());
    Some(notice)
}

/// Sign out. Failures are logged and produce no notice.
pub async fn sign_out_with_notice(auth: &dyn AuthProvider) -> Option<Notice> {
    match auth.sign_out().await {
        Ok(()) => Some(Notice::signed_out()),
        Err(e) => {
            tracing::error!(error = %e, "Error signing out");
            None
        }
    }
}
