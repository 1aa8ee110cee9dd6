//! PostgreSQL permalink repository

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::domain::permalink::{NewPermalink, Permalink, PermalinkRepository};
use crate::domain::DomainError;

/// Permalinks stored in the `queries` table.
///
/// `request_data` is kept as JSON text so rows written by older deployments
/// remain readable.
#[derive(Debug, Clone)]
pub struct PostgresPermalinkRepository {
    pool: PgPool,
}

impl PostgresPermalinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and makes sure the table exists
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to database: {}", e)))?;

        let repository = Self::new(pool);
        repository.ensure_schema().await?;

        info!(max_connections, "Permalink database ready");
        Ok(repository)
    }

    async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS queries (
                id BIGSERIAL PRIMARY KEY,
                model_name TEXT,
                request_data TEXT NOT NULL,
                timestamp TIMESTAMPTZ NOT NULL,
                model_id TEXT,
                task_name TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create queries table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl PermalinkRepository for PostgresPermalinkRepository {
    async fn insert(&self, permalink: NewPermalink) -> Result<u64, DomainError> {
        let request_data = serde_json::to_string(&permalink.request_data)
            .map_err(|e| DomainError::internal(format!("Failed to encode request data: {}", e)))?;

        let row = sqlx::query(
            r#"
            INSERT INTO queries (model_name, request_data, timestamp, model_id, task_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&permalink.model_name)
        .bind(request_data)
        .bind(permalink.created_at)
        .bind(&permalink.model_id)
        .bind(&permalink.task_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to insert permalink: {}", e)))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| DomainError::storage(format!("Failed to read permalink id: {}", e)))?;

        u64::try_from(id).map_err(|_| DomainError::storage(format!("Negative permalink id {}", id)))
    }

    async fn get(&self, id: u64) -> Result<Option<Permalink>, DomainError> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };

        let row = sqlx::query(
            r#"
            SELECT model_name, request_data, model_id, task_name
            FROM queries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get permalink: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_permalink(&row)?)),
            None => Ok(None),
        }
    }
}

fn row_to_permalink(row: &sqlx::postgres::PgRow) -> Result<Permalink, DomainError> {
    let get_err = |e: sqlx::Error| DomainError::storage(format!("Failed to read permalink: {}", e));

    let request_data: String = row.try_get("request_data").map_err(get_err)?;
    let request_data: Value = serde_json::from_str(&request_data)
        .map_err(|e| DomainError::storage(format!("Stored request data is not JSON: {}", e)))?;

    Ok(Permalink {
        model_name: row.try_get("model_name").map_err(get_err)?,
        request_data,
        model_id: row.try_get("model_id").map_err(get_err)?,
        task_name: row.try_get("task_name").map_err(get_err)?,
    })
}
