//! Clients, orders, order status history and edit requests

use crate::core::{Entity, Module};
use crate::entities::client::Client;
use crate::entities::order::{Order, status_history, update_order_status};
use crate::entities::order_edit_request::{
    OrderEditRequest, create_edit_request, get_edit_request, list_edit_requests,
    list_order_edit_requests, review_edit_request,
};
use crate::entities::order_status_change::OrderStatusChangeRequest;
use crate::server::entity_registry::{CrudDescriptor, EntityRegistry};
use crate::server::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

pub struct CommercialModule;

impl Module for CommercialModule {
    fn name(&self) -> &str {
        "commercial"
    }

    fn entity_types(&self) -> Vec<&str> {
        vec![
            Client::resource_name_singular(),
            Order::resource_name_singular(),
            OrderEditRequest::resource_name_singular(),
            OrderStatusChangeRequest::resource_name_singular(),
        ]
    }

    fn register_entities(&self, registry: &mut EntityRegistry) {
        registry.register(CrudDescriptor::<Client>::boxed());
        registry.register(CrudDescriptor::<Order>::boxed());
    }

    fn routes(&self) -> Router<AppState> {
        Router::new()
            .route("/orders/{id}/status", patch(update_order_status))
            .route("/orders/{id}/status-history", get(status_history))
            .route(
                "/orders/{id}/edit-requests",
                get(list_order_edit_requests).post(create_edit_request),
            )
            .route("/order-edit-requests", get(list_edit_requests))
            .route("/order-edit-requests/{id}", get(get_edit_request))
            .route("/order-edit-requests/{id}/review", post(review_edit_request))
    }
}
