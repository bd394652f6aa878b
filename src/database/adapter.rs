use serde_json::{Map, Value};
use sqlx::postgres::PgArguments;
use sqlx::Row;
use thiserror::Error;
use uuid::Uuid;

use crate::filter::{validate_identifier, Query, QuerySpec};

use super::manager::{Capability, PoolManager};

/// Errors surfaced by the data-access layer.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl AdapterError {
    /// SQLSTATE code of the underlying database error, when one exists.
    /// `42P01` (undefined table) is checked by the seeding runner.
    pub fn sqlstate(&self) -> Option<String> {
        match self {
            AdapterError::Sqlx(sqlx::Error::Database(db_err)) => {
                db_err.code().map(|c| c.to_string())
            }
            _ => None,
        }
    }
}

/// Read/projection parameters for a select. A thin alias over the query
/// spec so handlers describe intent without touching SQL.
pub type SelectQuery = QuerySpec;

/// Typed access to named collections in the remote database.
///
/// Each operation is a single round trip: no retries, no transactions
/// spanning calls, no client-side caching. The trust tier is fixed at
/// construction and visible at every call site.
#[derive(Clone)]
pub struct DataAdapter {
    capability: Capability,
    pools: PoolManager,
    max_limit: i32,
}

impl DataAdapter {
    pub fn new(capability: Capability, pools: PoolManager, max_limit: i32) -> Self {
        Self {
            capability,
            pools,
            max_limit,
        }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Filtered, ordered, optionally limited select. Returns each row as a
    /// JSON object; an empty result is not an error.
    pub async fn select(
        &self,
        collection: &str,
        query: SelectQuery,
    ) -> Result<Vec<Value>, AdapterError> {
        let mut builder = Query::new(collection, self.max_limit)
            .map_err(|e| AdapterError::InvalidIdentifier(e.to_string()))?;
        builder
            .assign(query)
            .map_err(|e| AdapterError::QueryError(e.to_string()))?;
        let inner = builder
            .to_sql()
            .map_err(|e| AdapterError::QueryError(e.to_string()))?;

        // row_to_json gives automatic column mapping for opaque payloads
        let sql = format!("SELECT row_to_json(t) AS row FROM ({}) t", inner.query);

        let mut q = sqlx::query(&sql);
        for p in inner.params.iter() {
            q = bind_value(q, p)?;
        }
        let pool = self.pools.pool(self.capability).await?;
        let rows = q.fetch_all(&pool).await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let value: Value = row.try_get("row")?;
            records.push(value);
        }
        Ok(records)
    }

    /// Partial update of one record by id. Returns the updated row, or
    /// `None` when no row matched (callers map that to 404).
    pub async fn update(
        &self,
        collection: &str,
        id: Uuid,
        changes: &Map<String, Value>,
    ) -> Result<Option<Value>, AdapterError> {
        validate_identifier(collection, "table")
            .map_err(|e| AdapterError::InvalidIdentifier(e.to_string()))?;
        if changes.is_empty() {
            return Err(AdapterError::QueryError(
                "update requires at least one field".to_string(),
            ));
        }

        let mut assignments = Vec::with_capacity(changes.len());
        let mut params: Vec<&Value> = Vec::with_capacity(changes.len());
        for (index, (column, value)) in changes.iter().enumerate() {
            validate_identifier(column, "column")
                .map_err(|e| AdapterError::InvalidIdentifier(e.to_string()))?;
            // $1 is reserved for the id
            assignments.push(format!("\"{}\" = ${}", column, index + 2));
            params.push(value);
        }

        let sql = format!(
            "UPDATE \"{}\" AS t SET {} WHERE t.id = $1 RETURNING to_jsonb(t) AS row",
            collection,
            assignments.join(", ")
        );

        let mut q = sqlx::query(&sql).bind(id);
        for p in params {
            q = bind_value(q, p)?;
        }
        let pool = self.pools.pool(self.capability).await?;
        match q.fetch_optional(&pool).await? {
            Some(row) => Ok(Some(row.try_get("row")?)),
            None => Ok(None),
        }
    }

    /// Insert one record and return it as stored.
    pub async fn insert(
        &self,
        collection: &str,
        record: &Map<String, Value>,
    ) -> Result<Value, AdapterError> {
        validate_identifier(collection, "table")
            .map_err(|e| AdapterError::InvalidIdentifier(e.to_string()))?;
        if record.is_empty() {
            return Err(AdapterError::QueryError(
                "insert requires at least one field".to_string(),
            ));
        }

        let mut columns = Vec::with_capacity(record.len());
        let mut placeholders = Vec::with_capacity(record.len());
        let mut params: Vec<&Value> = Vec::with_capacity(record.len());
        for (index, (column, value)) in record.iter().enumerate() {
            validate_identifier(column, "column")
                .map_err(|e| AdapterError::InvalidIdentifier(e.to_string()))?;
            columns.push(format!("\"{}\"", column));
            placeholders.push(format!("${}", index + 1));
            params.push(value);
        }

        let sql = format!(
            "INSERT INTO \"{}\" AS t ({}) VALUES ({}) RETURNING to_jsonb(t) AS row",
            collection,
            columns.join(", "),
            placeholders.join(", ")
        );

        let mut q = sqlx::query(&sql);
        for p in params {
            q = bind_value(q, p)?;
        }
        let pool = self.pools.pool(self.capability).await?;
        let row = q.fetch_one(&pool).await?;
        Ok(row.try_get("row")?)
    }
}

fn bind_value<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> Result<sqlx::query::Query<'q, sqlx::Postgres, PgArguments>, AdapterError> {
    let bound = match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(u) = n.as_u64() {
                // Postgres has no u64; cast down if it fits
                q.bind(u as i64)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        // The filter expands $in arrays into individual placeholders, so a
        // bare array here has no matching bind and must be refused rather
        // than silently skipped.
        Value::Array(_) => {
            return Err(AdapterError::QueryError(
                "array values cannot be bound as a single parameter".to_string(),
            ))
        }
        Value::Object(_) => q.bind(v.clone()), // JSONB
    };
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn adapter() -> DataAdapter {
        DataAdapter::new(
            Capability::Standard,
            PoolManager::new(crate::config::DatabaseConfig {
                max_connections: 1,
                connect_timeout_secs: 1,
            }),
            100,
        )
    }

    #[tokio::test]
    async fn update_rejects_empty_changes() {
        let result = adapter().update("student_media", Uuid::new_v4(), &Map::new()).await;
        assert!(matches!(result, Err(AdapterError::QueryError(_))));
    }

    #[tokio::test]
    async fn update_rejects_hostile_column() {
        let mut changes = Map::new();
        changes.insert("is_favorite\"; DROP TABLE x; --".to_string(), json!(true));
        let result = adapter().update("student_media", Uuid::new_v4(), &changes).await;
        assert!(matches!(result, Err(AdapterError::InvalidIdentifier(_))));
    }

    #[tokio::test]
    async fn update_rejects_array_values() {
        let mut changes = Map::new();
        changes.insert("tags".to_string(), json!([1, 2]));
        let result = adapter().update("student_media", Uuid::new_v4(), &changes).await;
        assert!(matches!(result, Err(AdapterError::QueryError(_))));
    }

    #[tokio::test]
    async fn select_rejects_hostile_collection() {
        let result = adapter()
            .select("media; DROP TABLE media", SelectQuery::default())
            .await;
        assert!(matches!(result, Err(AdapterError::InvalidIdentifier(_))));
    }

    #[test]
    fn sqlstate_only_for_database_errors() {
        assert_eq!(AdapterError::QueryError("x".into()).sqlstate(), None);
        assert_eq!(AdapterError::ConfigMissing("DATABASE_URL").sqlstate(), None);
    }
}
