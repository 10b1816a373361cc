use super::{read_json, SupabaseClient};
use crate::error_convert::ReqwestErrorExt;
use crate::query::{Query, Table};
use crate::session::SessionProvider;
use crate::store::DataStore;
use async_trait::async_trait;
use serde_json::Value;
use shared_types::AppError;

const RETURN_REPRESENTATION: &str = "return=representation";

/// Table client. Requests carry the signed-in user's token so row-level
/// security applies to them.
pub struct SupabaseStore {
    client: SupabaseClient,
    sessions: SessionProvider,
}

impl SupabaseStore {
    pub fn new(client: SupabaseClient, sessions: SessionProvider) -> Self {
        Self { client, sessions }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Vec<Value>, AppError> {
        let token = self.sessions.access_token();
        let response = self
            .client
            .authorize(request, token.as_deref())
            .send()
            .await
            .map_err(ReqwestErrorExt::into_app_error)?;
        read_json(response).await
    }
}

#[async_trait(?Send)]
impl DataStore for SupabaseStore {
    #[tracing::instrument(skip(self, query), fields(table = %query.table))]
    async fn select(&self, query: &Query) -> Result<Vec<Value>, AppError> {
        let request = self
            .client
            .http
            .get(self.client.rest_url(query.table))
            .query(&query.to_pairs());
        let rows = self.send(request).await?;
        tracing::debug!(rows = rows.len(), "Selected");
        Ok(rows)
    }

    #[tracing::instrument(skip(self, rows), fields(rows = rows.len()))]
    async fn insert(&self, table: Table, rows: Vec<Value>) -> Result<Vec<Value>, AppError> {
        let request = self
            .client
            .http
            .post(self.client.rest_url(table))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&rows);
        self.send(request).await
    }

    #[tracing::instrument(skip(self, query, patch), fields(table = %query.table))]
    async fn update(&self, query: &Query, patch: Value) -> Result<Vec<Value>, AppError> {
        if query.filters.is_empty() {
            return Err(AppError::bad_request("Refusing to update every row"));
        }
        let request = self
            .client
            .http
            .patch(self.client.rest_url(query.table))
            .query(&query.filter_pairs())
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&patch);
        self.send(request).await
    }
}
