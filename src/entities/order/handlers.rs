//! Order HTTP handlers

use super::dto::{CreateOrderDto, OrderChanges, UpdateOrderDto, UpdateOrderStatusDto};
use super::model::Order;
use crate::core::validation::filters;
use crate::core::{
    AppError, AuthContext, DataService, Entity, EntityError, OrderStatus, PaginatedResponse,
    QueryParams, StatusFlow, ValidatedJson, ValidationError,
};
use crate::entities::client::Client;
use crate::entities::commercial_channel::CommercialChannel;
use crate::entities::order_status_change::OrderStatusChangeRequest;
use crate::server::resource::{
    CrudResource, invalid_reference, list_related, load_active, load_reference, next_number,
    parse_field_id, parse_id, query_params,
};
use crate::server::state::AppState;
use async_trait::async_trait;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

async fn active_client(state: &AppState, id: Uuid) -> Result<Client, AppError> {
    let client = load_reference(state.clients.as_ref(), "clientId", id).await?;
    if !client.is_active {
        return Err(invalid_reference::<Client>("clientId", id).into());
    }
    Ok(client)
}

async fn active_channel(state: &AppState, id: Uuid) -> Result<CommercialChannel, AppError> {
    let field = "commercialChannelId";
    let channel = load_reference(state.commercial_channels.as_ref(), field, id).await?;
    if !channel.is_active {
        return Err(invalid_reference::<CommercialChannel>(field, id).into());
    }
    Ok(channel)
}

/// Apply a set of changes to an order, checking the channel reference
///
/// Shared by direct edits of pending orders and approved edit requests.
pub async fn apply_changes(
    state: &AppState,
    order: &mut Order,
    changes: OrderChanges,
) -> Result<(), AppError> {
    if let Some(raw) = changes.commercial_channel_id {
        let id = parse_field_id("commercialChannelId", &raw)?;
        active_channel(state, id).await?;
        order.commercial_channel_id = Some(id);
    }
    if let Some(description) = changes.description {
        order.description = filters::trim(description);
    }
    if let Some(special_condition) = changes.special_condition {
        order.special_condition = filters::trim_optional(Some(special_condition));
    }
    if let Some(value) = changes.estimated_value {
        order.estimated_value = Some(filters::money(value));
    }
    if let Some(date) = changes.delivery_date {
        order.delivery_date = Some(date);
    }
    Ok(())
}

#[async_trait]
impl CrudResource for Order {
    type Create = CreateOrderDto;
    type Update = UpdateOrderDto;

    fn service(state: &AppState) -> &Arc<dyn DataService<Self>> {
        &state.orders
    }

    async fn create_from(
        state: &AppState,
        auth: &AuthContext,
        input: CreateOrderDto,
    ) -> Result<Self, AppError> {
        let client_id = parse_field_id("clientId", &input.client_id)?;
        active_client(state, client_id).await?;

        let commercial_channel_id = match input.commercial_channel_id.as_deref() {
            Some(raw) => {
                let id = parse_field_id("commercialChannelId", raw)?;
                active_channel(state, id).await?;
                Some(id)
            }
            None => None,
        };

        let number = next_number(&state.sequences.orders, state.orders.as_ref(), |o| {
            o.number.as_str()
        })
        .await?;

        Ok(Order::new(
            number,
            client_id,
            commercial_channel_id,
            filters::trim(input.description),
            filters::trim_optional(input.special_condition),
            input.estimated_value.map(filters::money),
            input.delivery_date,
            OrderStatus::Pending,
            auth.user_id().map(str::to_string),
        ))
    }

    async fn apply_update(
        state: &AppState,
        mut order: Self,
        mut input: UpdateOrderDto,
    ) -> Result<Self, AppError> {
        if order.status != OrderStatus::Pending {
            return Err(EntityError::invalid_state(
                "order",
                format!(
                    "El pedido {} está en estado {}; los cambios requieren una solicitud de edición",
                    order.number, order.status
                ),
            )
            .into());
        }

        if let Some(raw) = input.client_id.take() {
            let client_id = parse_field_id("clientId", &raw)?;
            active_client(state, client_id).await?;
            order.client_id = client_id;
        }
        apply_changes(state, &mut order, OrderChanges::from(input)).await?;
        Ok(order)
    }

    async fn check_delete(_state: &AppState, order: &Self) -> Result<(), AppError> {
        match order.status {
            OrderStatus::Pending | OrderStatus::Cancelled => Ok(()),
            status => Err(EntityError::invalid_state(
                "order",
                format!("No se puede eliminar un pedido en estado {status}"),
            )
            .into()),
        }
    }
}

/// PATCH /orders/{id}/status
pub async fn update_order_status(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateOrderStatusDto>,
) -> Result<Json<Order>, AppError> {
    let id = parse_id(&id)?;
    let mut order = load_active(state.orders.as_ref(), id).await?;

    let from = order.status;
    from.ensure_transition(input.status, Order::resource_name_singular())?;

    let reason = filters::trim_optional(input.reason);
    if input.status == OrderStatus::Cancelled && reason.is_none() {
        return Err(ValidationError::field(
            "reason",
            "Debe indicar el motivo de la cancelación",
        )
        .into());
    }

    order.status = input.status;
    order.touch();
    let order = state.orders.update(&id, order).await?;

    state
        .order_status_changes
        .create(OrderStatusChangeRequest::new(
            id,
            from,
            input.status,
            reason,
            auth.user_id().map(str::to_string),
        ))
        .await?;

    tracing::info!(
        number = %order.number,
        from = %from,
        to = %order.status,
        user = auth.user_id().unwrap_or("-"),
        "order status changed"
    );
    Ok(Json(order))
}

/// GET /orders/{id}/status-history
pub async fn status_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Value>>, AppError> {
    let params = query_params(query)?;
    let id = parse_id(&id)?;
    load_active(state.orders.as_ref(), id).await?;
    list_related(state.order_status_changes.as_ref(), "orderId", id, &params).await
}
