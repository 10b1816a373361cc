use super::{expect_success, read_json, SupabaseClient};
use crate::auth::AuthProvider;
use crate::error_convert::ReqwestErrorExt;
use crate::session::{SessionProvider, SessionStorage};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use shared_types::{AppError, Identity, Session, SignInRequest, SignUpRequest};
use std::sync::Arc;

/// Token grant response from `/auth/v1/token`.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: Identity,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now + secs))
            .unwrap_or(0);
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// Auth client. The only writer to its [`SessionProvider`].
pub struct SupabaseAuth {
    client: SupabaseClient,
    sessions: SessionProvider,
    storage: Arc<dyn SessionStorage>,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient, sessions: SessionProvider, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            client,
            sessions,
            storage,
        }
    }

    async fn establish(&self, session: Session) {
        self.storage.save(&session).await;
        self.sessions.publish(Some(session));
    }

    async fn forget(&self) {
        self.storage.clear().await;
        self.sessions.publish(None);
    }

    async fn grant(&self, grant_type: &str, body: serde_json::Value) -> Result<Session, AppError> {
        let request = self
            .client
            .http
            .post(self.client.auth_url("token"))
            .query(&[("grant_type", grant_type)])
            .json(&body);
        let response = self
            .client
            .authorize(request, None)
            .send()
            .await
            .map_err(ReqwestErrorExt::into_app_error)?;
        let token: TokenResponse = read_json(response).await?;
        Ok(token.into_session(crate::now_unix()))
    }
}

#[async_trait(?Send)]
impl AuthProvider for SupabaseAuth {
    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), AppError> {
        let body = json!({
            "email": request.email,
            "password": request.password,
            "data": {
                "name": request.metadata.name,
                "role": request.metadata.role,
            },
        });
        let http = self
            .client
            .http
            .post(self.client.auth_url("signup"))
            .query(&[("redirect_to", request.email_redirect_to.as_str())])
            .json(&body);
        let response = self
            .client
            .authorize(http, None)
            .send()
            .await
            .map_err(ReqwestErrorExt::into_app_error)?;
        expect_success(response).await?;
        tracing::info!("Account created");
        Ok(())
    }

    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    async fn sign_in(&self, request: &SignInRequest) -> Result<Session, AppError> {
        let session = self
            .grant(
                "password",
                json!({ "email": request.email, "password": request.password }),
            )
            .await?;
        self.establish(session.clone()).await;
        tracing::info!(user_id = %session.user.id, "Signed in");
        Ok(session)
    }

    #[tracing::instrument(skip(self))]
    async fn sign_out(&self) -> Result<(), AppError> {
        let token = self.sessions.access_token();
        self.forget().await;
        let Some(token) = token else {
            return Ok(());
        };
        let http = self.client.http.post(self.client.auth_url("logout"));
        let response = self
            .client
            .authorize(http, Some(&token))
            .send()
            .await
            .map_err(ReqwestErrorExt::into_app_error)?;
        expect_success(response).await
    }

    async fn get_session(&self) -> Result<Option<Session>, AppError> {
        let session = match self.sessions.current() {
            Some(session) => Some(session),
            None => self.storage.load().await,
        };
        let Some(session) = session else {
            self.sessions.publish(None);
            return Ok(None);
        };
        if session.is_expired(crate::now_unix()) {
            tracing::debug!("Access token expired, refreshing");
            return self.refresh_session().await.map(Some);
        }
        self.sessions.publish(Some(session.clone()));
        Ok(Some(session))
    }

    #[tracing::instrument(skip(self))]
    async fn refresh_session(&self) -> Result<Session, AppError> {
        let refresh_token = match self.sessions.current() {
            Some(session) => Some(session.refresh_token),
            None => self.storage.load().await.map(|s| s.refresh_token),
        }
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized("No session to refresh"))?;

        match self
            .grant("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
        {
            Ok(session) => {
                self.establish(session.clone()).await;
                Ok(session)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session refresh failed, signing out locally");
                self.forget().await;
                Err(e)
            }
        }
    }

    fn sessions(&self) -> &SessionProvider {
        &self.sessions
    }
}
