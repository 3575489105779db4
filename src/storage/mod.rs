//! Storage implementations for different backends

pub mod in_memory;
pub mod objects;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "s3")]
pub mod s3;

pub use in_memory::InMemoryDataService;
pub use objects::{InMemoryObjectStorage, ObjectStorage, StoredObject};
#[cfg(feature = "postgres")]
pub use postgres::PostgresDataService;
#[cfg(feature = "s3")]
pub use s3::S3ObjectStorage;

use crate::config::{AwsConfig, DatabaseConfig};
use crate::core::{DataService, Entity};
use anyhow::Result;
use std::sync::Arc;

/// Persistence backend shared by every record type
#[derive(Clone)]
pub enum Backend {
    InMemory,
    #[cfg(feature = "postgres")]
    Postgres(sqlx::PgPool),
}

impl Backend {
    /// PostgreSQL when `DATABASE_URL` is set and the feature is enabled
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        match &config.url {
            #[cfg(feature = "postgres")]
            Some(_) => {
                let pool = postgres::connect(config).await?;
                postgres::ensure_schema(&pool).await?;
                Ok(Backend::Postgres(pool))
            }
            #[cfg(not(feature = "postgres"))]
            Some(_) => {
                tracing::warn!("DATABASE_URL is set but the postgres feature is disabled; using memory");
                Ok(Backend::InMemory)
            }
            None => Ok(Backend::InMemory),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::InMemory => "memory",
            #[cfg(feature = "postgres")]
            Backend::Postgres(_) => "postgres",
        }
    }

    /// Data service for one record type
    pub fn service<T: Entity + Unpin>(&self) -> Arc<dyn DataService<T>> {
        match self {
            Backend::InMemory => Arc::new(InMemoryDataService::<T>::new()),
            #[cfg(feature = "postgres")]
            Backend::Postgres(pool) => Arc::new(PostgresDataService::<T>::new(pool.clone())),
        }
    }
}

/// S3 when the bucket and credentials are configured and the feature is enabled
pub fn object_storage(config: &AwsConfig) -> Result<Arc<dyn ObjectStorage>> {
    if config.is_configured() {
        #[cfg(feature = "s3")]
        {
            return Ok(Arc::new(S3ObjectStorage::from_config(config)?));
        }
        #[cfg(not(feature = "s3"))]
        tracing::warn!("S3 credentials are set but the s3 feature is disabled; using memory");
    }
    Ok(Arc::new(InMemoryObjectStorage::new()))
}
