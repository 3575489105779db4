//! Entity registry for managing entity descriptors and auto-generating CRUD routes

use super::resource::{CrudResource, crud_routes};
use super::state::AppState;
use axum::Router;
use std::collections::HashMap;
use std::marker::PhantomData;

/// Trait that describes how to build routes for an entity
///
/// Most records use [`CrudDescriptor`]; resources with a non-JSON surface
/// (file uploads) provide their own descriptor.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "work_order")
    fn entity_type(&self) -> &str;

    /// The plural path segment (e.g., "work-orders")
    fn plural(&self) -> &str;

    /// Build the CRUD routes for this entity
    fn build_routes(&self) -> Router<AppState>;
}

/// Descriptor exposing the generic CRUD handlers of `T`
pub struct CrudDescriptor<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: CrudResource> CrudDescriptor<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    pub fn boxed() -> Box<dyn EntityDescriptor> {
        Box::new(Self::new())
    }
}

impl<T: CrudResource> Default for CrudDescriptor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CrudResource> EntityDescriptor for CrudDescriptor<T> {
    fn entity_type(&self) -> &str {
        T::resource_name_singular()
    }

    fn plural(&self) -> &str {
        T::resource_name()
    }

    fn build_routes(&self) -> Router<AppState> {
        crud_routes::<T>()
    }
}

/// Registry for all entities in the application
///
/// This registry collects entity descriptors from all registered modules
/// and can generate a router with all CRUD routes.
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: HashMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// Register an entity descriptor
    ///
    /// The entity type name will be used as the key.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Build a router with all registered entity routes
    pub fn build_routes(&self) -> Router<AppState> {
        let mut router = Router::new();

        for descriptor in self.descriptors.values() {
            router = router.merge(descriptor.build_routes());
        }

        router
    }

    /// Get all registered entity types, sorted
    pub fn entity_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.descriptors.keys().map(|s| s.as_str()).collect();
        types.sort_unstable();
        types
    }

    /// Plural path of a registered entity type
    pub fn plural_of(&self, entity_type: &str) -> Option<&str> {
        self.descriptors.get(entity_type).map(|d| d.plural())
    }
}
