//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresDataService<T>` backed by a PostgreSQL database via
//! `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag.
//!
//! # Schema
//!
//! Every record lives in a shared `records` table keyed by id and
//! `entity_type`. The full serialized record is kept in a JSONB `data`
//! column; timestamps are duplicated into columns for ordering.

use crate::config::DatabaseConfig;
use crate::core::{DataService, Entity};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use uuid::Uuid;

/// Open a connection pool from the database configuration
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| anyhow!("DATABASE_URL is not set"))?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await
        .map_err(|e| anyhow!("Failed to connect to PostgreSQL: {}", e))
}

/// Apply the required table and indexes (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS records (
            id UUID PRIMARY KEY,
            entity_type TEXT NOT NULL,
            data JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL,
            deleted_at TIMESTAMPTZ NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create records table: {}", e))?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_records_type_created
            ON records (entity_type, created_at)",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create records index: {}", e))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_records_data ON records USING GIN (data)")
        .execute(pool)
        .await
        .map_err(|e| anyhow!("Failed to create records GIN index: {}", e))?;

    Ok(())
}

/// Generic data storage service backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// let pool = PgPool::connect("postgres://localhost/gestor").await?;
/// let areas = PostgresDataService::<Area>::new(pool);
/// let area = areas.create(area).await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresDataService<T> {
    pool: PgPool,
    _marker: std::marker::PhantomData<T>,
}

impl<T> PostgresDataService<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl<T: Entity + Unpin> PostgresDataService<T> {
    fn entity_type_name() -> &'static str {
        T::resource_name_singular()
    }

    fn decode_rows(rows: Vec<(Json<T>,)>) -> Vec<T> {
        rows.into_iter().map(|(Json(entity),)| entity).collect()
    }
}

#[async_trait]
impl<T: Entity + Unpin> DataService<T> for PostgresDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        sqlx::query(
            "INSERT INTO records (id, entity_type, data, created_at, updated_at, deleted_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(entity.id())
        .bind(Self::entity_type_name())
        .bind(Json(&entity))
        .bind(entity.created_at())
        .bind(entity.updated_at())
        .bind(entity.deleted_at())
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to insert {}: {}", Self::entity_type_name(), e))?;

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let row: Option<(Json<T>,)> =
            sqlx::query_as("SELECT data FROM records WHERE id = $1 AND entity_type = $2")
                .bind(id)
                .bind(Self::entity_type_name())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| anyhow!("Failed to fetch {}: {}", Self::entity_type_name(), e))?;

        Ok(row.map(|(Json(entity),)| entity))
    }

    async fn list(&self) -> Result<Vec<T>> {
        let rows: Vec<(Json<T>,)> = sqlx::query_as(
            "SELECT data FROM records WHERE entity_type = $1 ORDER BY created_at, id",
        )
        .bind(Self::entity_type_name())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to list {}: {}", T::resource_name(), e))?;

        Ok(Self::decode_rows(rows))
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<T> {
        let result = sqlx::query(
            "UPDATE records SET data = $3, updated_at = $4, deleted_at = $5
             WHERE id = $1 AND entity_type = $2",
        )
        .bind(id)
        .bind(Self::entity_type_name())
        .bind(Json(&entity))
        .bind(entity.updated_at())
        .bind(entity.deleted_at())
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to update {}: {}", Self::entity_type_name(), e))?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("{} {} not found", Self::entity_type_name(), id));
        }
        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        sqlx::query("DELETE FROM records WHERE id = $1 AND entity_type = $2")
            .bind(id)
            .bind(Self::entity_type_name())
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete {}: {}", Self::entity_type_name(), e))?;

        Ok(())
    }

    async fn search(&self, field: &str, value: &serde_json::Value) -> Result<Vec<T>> {
        let rows: Vec<(Json<T>,)> = sqlx::query_as(
            "SELECT data FROM records
             WHERE entity_type = $1 AND data -> $2 = $3
             ORDER BY created_at, id",
        )
        .bind(Self::entity_type_name())
        .bind(field)
        .bind(Json(value))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to search {}: {}", T::resource_name(), e))?;

        Ok(Self::decode_rows(rows))
    }
}
