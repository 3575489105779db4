//! Areas, cargos, commercial channels, the expense catalog and locations

use crate::core::{Entity, Module};
use crate::entities::area::{Area, list_area_cargos};
use crate::entities::cargo::Cargo;
use crate::entities::commercial_channel::CommercialChannel;
use crate::entities::expense_subcategory::ExpenseSubcategory;
use crate::entities::expense_type::{ExpenseType, list_subcategories};
use crate::entities::location::{list_cities, list_department_cities, list_departments};
use crate::server::entity_registry::{CrudDescriptor, EntityRegistry};
use crate::server::state::AppState;
use axum::{Router, routing::get};

pub struct CatalogModule;

impl Module for CatalogModule {
    fn name(&self) -> &str {
        "catalog"
    }

    fn entity_types(&self) -> Vec<&str> {
        vec![
            Area::resource_name_singular(),
            Cargo::resource_name_singular(),
            CommercialChannel::resource_name_singular(),
            ExpenseType::resource_name_singular(),
            ExpenseSubcategory::resource_name_singular(),
        ]
    }

    fn register_entities(&self, registry: &mut EntityRegistry) {
        registry.register(CrudDescriptor::<Area>::boxed());
        registry.register(CrudDescriptor::<Cargo>::boxed());
        registry.register(CrudDescriptor::<CommercialChannel>::boxed());
        registry.register(CrudDescriptor::<ExpenseType>::boxed());
        registry.register(CrudDescriptor::<ExpenseSubcategory>::boxed());
    }

    fn routes(&self) -> Router<AppState> {
        Router::new()
            .route("/areas/{id}/cargos", get(list_area_cargos))
            .route("/expense-types/{id}/subcategories", get(list_subcategories))
            .route("/departments", get(list_departments))
            .route("/departments/{id}/cities", get(list_department_cities))
            .route("/cities", get(list_cities))
    }
}
