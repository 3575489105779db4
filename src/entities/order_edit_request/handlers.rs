//! Order edit request HTTP handlers

use super::dto::{CreateOrderEditRequestDto, ReviewOrderEditRequestDto};
use super::model::OrderEditRequest;
use crate::core::auth::ROLE_ADMIN;
use crate::core::validation::filters;
use crate::core::{
    AppError, AuthContext, AuthPolicy, EditRequestStatus, Entity, EntityError, PaginatedResponse,
    QueryParams, StatusFlow, ValidatedJson, ValidationError,
};
use crate::entities::order::{Order, apply_changes};
use crate::server::resource::{
    children, list_related, live, load_active, parse_id, query_params, to_values,
};
use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::Value;

/// POST /orders/{id}/edit-requests
pub async fn create_edit_request(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<CreateOrderEditRequestDto>,
) -> Result<(StatusCode, Json<OrderEditRequest>), AppError> {
    let id = parse_id(&id)?;
    if input.changes.is_empty() {
        return Err(ValidationError::field("changes", "Debe proponer al menos un cambio").into());
    }

    let order = load_active(state.orders.as_ref(), id).await?;
    if order.status.is_terminal() {
        return Err(EntityError::invalid_state(
            "order",
            format!(
                "El pedido {} está en estado {} y ya no admite cambios",
                order.number, order.status
            ),
        )
        .into());
    }

    let pending = children(state.order_edit_requests.as_ref(), "orderId", id)
        .await?
        .into_iter()
        .any(|request| request.status == EditRequestStatus::Pending);
    if pending {
        return Err(EntityError::invalid_state(
            "order_edit_request",
            format!(
                "El pedido {} ya tiene una solicitud de edición pendiente",
                order.number
            ),
        )
        .into());
    }

    // References are checked on a scratch copy of the order
    apply_changes(&state, &mut order.clone(), input.changes.clone()).await?;

    let request = state
        .order_edit_requests
        .create(OrderEditRequest::new(
            id,
            input.changes,
            filters::trim(input.reason),
            EditRequestStatus::Pending,
            auth.user_id().map(str::to_string),
            None,
            None,
            None,
        ))
        .await?;

    tracing::info!(
        number = %order.number,
        request = %request.id,
        user = auth.user_id().unwrap_or("-"),
        "order edit requested"
    );
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /orders/{id}/edit-requests
pub async fn list_order_edit_requests(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Value>>, AppError> {
    let params = query_params(query)?;
    let id = parse_id(&id)?;
    load_active(state.orders.as_ref(), id).await?;
    list_related(state.order_edit_requests.as_ref(), "orderId", id, &params).await
}

/// GET /order-edit-requests
pub async fn list_edit_requests(
    State(state): State<AppState>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Value>>, AppError> {
    let params = query_params(query)?;
    let requests = live(state.order_edit_requests.list().await?);
    Ok(Json(params.apply(to_values(&requests)?)))
}

/// GET /order-edit-requests/{id}
pub async fn get_edit_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderEditRequest>, AppError> {
    let id = parse_id(&id)?;
    let request = load_active(state.order_edit_requests.as_ref(), id).await?;
    Ok(Json(request))
}

/// POST /order-edit-requests/{id}/review
///
/// Approval applies the stored changes to the order in the same call.
pub async fn review_edit_request(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<ReviewOrderEditRequestDto>,
) -> Result<Json<OrderEditRequest>, AppError> {
    auth.require(&AuthPolicy::roles(&[ROLE_ADMIN]))?;

    let id = parse_id(&id)?;
    let mut request = load_active(state.order_edit_requests.as_ref(), id).await?;
    if request.status != EditRequestStatus::Pending {
        return Err(EntityError::invalid_state(
            "order_edit_request",
            format!("La solicitud ya fue revisada ({})", request.status),
        )
        .into());
    }

    if input.approved {
        let mut order: Order = load_active(state.orders.as_ref(), request.order_id).await?;
        if order.status.is_terminal() {
            return Err(EntityError::invalid_state(
                "order",
                format!(
                    "El pedido {} está en estado {} y ya no admite cambios",
                    order.number, order.status
                ),
            )
            .into());
        }
        apply_changes(&state, &mut order, request.changes.clone()).await?;
        order.touch();
        state.orders.update(&request.order_id, order).await?;
    }

    request.status = if input.approved {
        EditRequestStatus::Approved
    } else {
        EditRequestStatus::Rejected
    };
    request.reviewed_by = auth.user_id().map(str::to_string);
    request.reviewed_at = Some(Utc::now());
    request.review_note = filters::trim_optional(input.review_note);
    request.touch();
    let request = state.order_edit_requests.update(&id, request).await?;

    tracing::info!(
        request = %id,
        order = %request.order_id,
        status = %request.status,
        "order edit request reviewed"
    );
    Ok(Json(request))
}
