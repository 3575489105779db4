//! Work orders and the expenses charged to them

use crate::core::{Entity, Module};
use crate::entities::expense_order::{
    ExpenseOrder, authorize_expense_order, list_work_order_expenses, pay_expense_order,
};
use crate::entities::work_order::{WorkOrder, list_order_work_orders, update_work_order_status};
use crate::server::entity_registry::{CrudDescriptor, EntityRegistry};
use crate::server::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

pub struct OperationsModule;

impl Module for OperationsModule {
    fn name(&self) -> &str {
        "operations"
    }

    fn entity_types(&self) -> Vec<&str> {
        vec![
            WorkOrder::resource_name_singular(),
            ExpenseOrder::resource_name_singular(),
        ]
    }

    fn register_entities(&self, registry: &mut EntityRegistry) {
        registry.register(CrudDescriptor::<WorkOrder>::boxed());
        registry.register(CrudDescriptor::<ExpenseOrder>::boxed());
    }

    fn routes(&self) -> Router<AppState> {
        Router::new()
            .route("/orders/{id}/work-orders", get(list_order_work_orders))
            .route("/work-orders/{id}/status", patch(update_work_order_status))
            .route(
                "/work-orders/{id}/expense-orders",
                get(list_work_order_expenses),
            )
            .route("/expense-orders/{id}/authorize", post(authorize_expense_order))
            .route("/expense-orders/{id}/pay", post(pay_expense_order))
    }
}
