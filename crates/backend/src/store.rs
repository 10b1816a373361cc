use crate::query::{Query, Table};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared_types::AppError;

/// Managed relational tables.
#[async_trait(?Send)]
pub trait DataStore {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, AppError>;

    /// Insert rows and return them as stored.
    async fn insert(&self, table: Table, rows: Vec<Value>) -> Result<Vec<Value>, AppError>;

    /// Patch every row matching the query's filters and return them.
    async fn update(&self, query: &Query, patch: Value) -> Result<Vec<Value>, AppError>;
}

/// Decode rows into typed records.
pub fn decode_rows<T: DeserializeOwned>(table: Table, rows: Vec<Value>) -> Result<Vec<T>, AppError> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row)
                .map_err(|e| AppError::decode(format!("Unexpected {table} row: {e}")))
        })
        .collect()
}

pub async fn select_as<T: DeserializeOwned>(
    store: &dyn DataStore,
    query: &Query,
) -> Result<Vec<T>, AppError> {
    let rows = store.select(query).await?;
    decode_rows(query.table, rows)
}

/// Insert a single row and decode what the store returned.
pub async fn insert_one<I: Serialize, T: DeserializeOwned>(
    store: &dyn DataStore,
    table: Table,
    row: &I,
) -> Result<T, AppError> {
    let value = serde_json::to_value(row)
        .map_err(|e| AppError::internal(format!("Could not encode {table} row: {e}")))?;
    let stored = store.insert(table, vec![value]).await?;
    decode_rows(table, stored)?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::internal(format!("Insert into {table} returned no row")))
}
