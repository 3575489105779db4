//! Module system
//!
//! A module groups related resources. It registers the generic CRUD
//! descriptors of its entities and contributes the routes that do not fit
//! the CRUD pattern (status changes, nested listings, uploads).

use crate::server::entity_registry::EntityRegistry;
use crate::server::state::AppState;
use axum::Router;

/// Trait for a business module
pub trait Module: Send + Sync {
    /// Unique module name
    fn name(&self) -> &str;

    /// List of entity types managed by this module
    fn entity_types(&self) -> Vec<&str>;

    /// Register entities with the entity registry
    ///
    /// Each entity descriptor provides the CRUD routes for that entity.
    fn register_entities(&self, registry: &mut EntityRegistry);

    /// Routes beyond generic CRUD
    fn routes(&self) -> Router<AppState> {
        Router::new()
    }
}
