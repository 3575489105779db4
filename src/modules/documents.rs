//! File uploads

use crate::core::{Entity, Module};
use crate::entities::file::{File, FileDescriptor};
use crate::server::entity_registry::EntityRegistry;

pub struct DocumentsModule;

impl Module for DocumentsModule {
    fn name(&self) -> &str {
        "documents"
    }

    fn entity_types(&self) -> Vec<&str> {
        vec![File::resource_name_singular()]
    }

    fn register_entities(&self, registry: &mut EntityRegistry) {
        registry.register(Box::new(FileDescriptor));
    }
}
