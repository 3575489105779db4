//! Service trait for record persistence

use crate::core::Entity;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing records of one type
///
/// Implementations provide CRUD operations for a specific entity type.
/// The handlers are agnostic to the underlying storage mechanism.
/// Soft-deleted records are still returned; callers decide visibility.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Create a new entity; fails if the id is already taken
    async fn create(&self, entity: T) -> Result<T>;

    /// Get an entity by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all entities in creation order
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing entity; fails if it does not exist
    async fn update(&self, id: &Uuid, entity: T) -> Result<T>;

    /// Permanently remove an entity
    async fn delete(&self, id: &Uuid) -> Result<()>;

    /// Find entities whose serialized `field` equals `value`
    async fn search(&self, field: &str, value: &serde_json::Value) -> Result<Vec<T>>;
}
