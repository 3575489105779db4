//! Server module for building the HTTP application
//!
//! The `ServerBuilder` collects modules and assembles:
//! - CRUD routes for every entity descriptor they register
//! - The custom routes each module contributes
//! - Health, token refresh and status catalog routes

pub mod builder;
pub mod entity_registry;
pub mod resource;
pub mod state;
pub mod system;

pub use builder::ServerBuilder;
pub use entity_registry::{CrudDescriptor, EntityDescriptor, EntityRegistry};
pub use resource::CrudResource;
pub use state::AppState;
