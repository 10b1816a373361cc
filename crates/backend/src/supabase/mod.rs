//! HTTP client for a Supabase-compatible backend: GoTrue auth under
//! `/auth/v1` and PostgREST tables under `/rest/v1`.

mod auth;
mod rest;

pub use auth::SupabaseAuth;
pub use rest::SupabaseStore;

use crate::config::check_backend;
use crate::error_convert::{error_from_body, ReqwestErrorExt};
use crate::query::Table;
use crate::session::{SessionProvider, SessionStorage};
use serde::de::DeserializeOwned;
use shared_types::{AppError, BackendConfig};
use std::sync::Arc;

/// Shared HTTP client and connection settings.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl SupabaseClient {
    pub fn new(config: BackendConfig) -> Result<Self, AppError> {
        let config = check_backend(&config)?;
        Ok(Self {
            http: reqwest::Client::new(),
            config,
        })
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.base_url(), path.trim_start_matches('/'))
    }

    pub fn rest_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.config.base_url(), table.as_str())
    }

    /// Attach the project key, authorizing as `bearer` or else anonymously.
    fn authorize(&self, request: reqwest::RequestBuilder, bearer: Option<&str>) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.config.anon_key.as_str())
            .bearer_auth(bearer.unwrap_or(self.config.anon_key.as_str()))
    }
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("url", &self.config.base_url())
            .finish_non_exhaustive()
    }
}

/// Decode a success body, or turn an error status into an AppError.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(error_from_body(status.as_u16(), &body));
    }
    response.json::<T>().await.map_err(ReqwestErrorExt::into_app_error)
}

async fn expect_success(response: reqwest::Response) -> Result<(), AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(error_from_body(status.as_u16(), &body))
}

/// Auth and store clients sharing one session provider.
pub struct Supabase {
    pub auth: Arc<SupabaseAuth>,
    pub store: Arc<SupabaseStore>,
}

pub fn connect(config: BackendConfig, storage: Arc<dyn SessionStorage>) -> Result<Supabase, AppError> {
    let client = SupabaseClient::new(config)?;
    let sessions = SessionProvider::new();
    tracing::debug!(?client, "Connecting to backend");
    Ok(Supabase {
        auth: Arc::new(SupabaseAuth::new(client.clone(), sessions.clone(), storage)),
        store: Arc::new(SupabaseStore::new(client, sessions)),
    })
}
