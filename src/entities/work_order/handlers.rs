//! Work order HTTP handlers

use super::dto::{CreateWorkOrderDto, UpdateWorkOrderDto, UpdateWorkOrderStatusDto};
use super::model::WorkOrder;
use crate::core::validation::filters;
use crate::core::{
    AppError, AuthContext, DataService, Entity, EntityError, OrderStatus, PaginatedResponse,
    QueryParams, StatusFlow, ValidatedJson, ValidationError, WorkOrderStatus,
};
use crate::entities::cargo::Cargo;
use crate::entities::order::Order;
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
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Reject an end date earlier than the start date
pub fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::field(
            "endDate",
            "La fecha de fin no puede ser anterior a la fecha de inicio",
        )),
        _ => Ok(()),
    }
}

/// Load the order a new work order is attached to
///
/// Work only starts once the order is approved.
async fn workable_order(state: &AppState, id: Uuid) -> Result<Order, AppError> {
    let order = load_reference(state.orders.as_ref(), "orderId", id).await?;
    match order.status {
        OrderStatus::Approved | OrderStatus::InProgress => Ok(order),
        status => Err(EntityError::invalid_state(
            "order",
            format!(
                "El pedido {} está en estado {status}; solo se crean órdenes de trabajo para pedidos APPROVED o IN_PROGRESS",
                order.number
            ),
        )
        .into()),
    }
}

async fn active_cargo(state: &AppState, raw: &str) -> Result<Uuid, AppError> {
    let id = parse_field_id("cargoId", raw)?;
    let cargo = load_reference(state.cargos.as_ref(), "cargoId", id).await?;
    if !cargo.is_active {
        return Err(invalid_reference::<Cargo>("cargoId", id).into());
    }
    Ok(id)
}

fn ensure_open(work_order: &WorkOrder) -> Result<(), EntityError> {
    if work_order.status.is_terminal() {
        return Err(EntityError::invalid_state(
            "work_order",
            format!(
                "La orden de trabajo {} está en estado {} y no puede modificarse",
                work_order.number, work_order.status
            ),
        ));
    }
    Ok(())
}

#[async_trait]
impl CrudResource for WorkOrder {
    type Create = CreateWorkOrderDto;
    type Update = UpdateWorkOrderDto;

    fn service(state: &AppState) -> &Arc<dyn DataService<Self>> {
        &state.work_orders
    }

    async fn create_from(
        state: &AppState,
        auth: &AuthContext,
        input: CreateWorkOrderDto,
    ) -> Result<Self, AppError> {
        check_dates(input.start_date, input.end_date)?;

        let order_id = parse_field_id("orderId", &input.order_id)?;
        workable_order(state, order_id).await?;

        let cargo_id = match input.cargo_id.as_deref() {
            Some(raw) => Some(active_cargo(state, raw).await?),
            None => None,
        };

        let number = next_number(&state.sequences.work_orders, state.work_orders.as_ref(), |w| {
            w.number.as_str()
        })
        .await?;

        Ok(WorkOrder::new(
            number,
            order_id,
            cargo_id,
            filters::trim_optional(input.assignee),
            filters::trim(input.description),
            input.start_date,
            input.end_date,
            WorkOrderStatus::Pending,
            None,
            auth.user_id().map(str::to_string),
        ))
    }

    async fn apply_update(
        state: &AppState,
        mut work_order: Self,
        input: UpdateWorkOrderDto,
    ) -> Result<Self, AppError> {
        ensure_open(&work_order)?;

        let start_date = input.start_date.or(work_order.start_date);
        let end_date = input.end_date.or(work_order.end_date);
        check_dates(start_date, end_date)?;

        if let Some(raw) = input.cargo_id.as_deref() {
            work_order.cargo_id = Some(active_cargo(state, raw).await?);
        }
        if let Some(assignee) = input.assignee {
            work_order.assignee = filters::trim_optional(Some(assignee));
        }
        if let Some(description) = input.description {
            work_order.description = filters::trim(description);
        }
        work_order.start_date = start_date;
        work_order.end_date = end_date;
        Ok(work_order)
    }

    async fn check_delete(_state: &AppState, work_order: &Self) -> Result<(), AppError> {
        match work_order.status {
            WorkOrderStatus::Pending | WorkOrderStatus::Cancelled => Ok(()),
            status => Err(EntityError::invalid_state(
                "work_order",
                format!("No se puede eliminar una orden de trabajo en estado {status}"),
            )
            .into()),
        }
    }
}

/// PATCH /work-orders/{id}/status
pub async fn update_work_order_status(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateWorkOrderStatusDto>,
) -> Result<Json<WorkOrder>, AppError> {
    let id = parse_id(&id)?;
    let mut work_order = load_active(state.work_orders.as_ref(), id).await?;

    let from = work_order.status;
    from.ensure_transition(input.status, WorkOrder::resource_name_singular())?;

    work_order.status = input.status;
    if let Some(observation) = filters::trim_optional(input.observation) {
        work_order.observation = Some(observation);
    }
    work_order.touch();
    let work_order = state.work_orders.update(&id, work_order).await?;

    tracing::info!(
        number = %work_order.number,
        from = %from,
        to = %work_order.status,
        user = auth.user_id().unwrap_or("-"),
        "work order status changed"
    );
    Ok(Json(work_order))
}

/// GET /orders/{id}/work-orders
pub async fn list_order_work_orders(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Value>>, AppError> {
    let params = query_params(query)?;
    let id = parse_id(&id)?;
    load_active(state.orders.as_ref(), id).await?;
    list_related(state.work_orders.as_ref(), "orderId", id, &params).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> Option<NaiveDate> {
        Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap())
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let err = check_dates(date("2025-03-10"), date("2025-03-01")).unwrap_err();
        match err {
            ValidationError::FieldErrors(fields) => assert!(fields.contains_key("endDate")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_same_day_and_open_ranges_are_fine() {
        assert!(check_dates(date("2025-03-10"), date("2025-03-10")).is_ok());
        assert!(check_dates(None, date("2025-03-10")).is_ok());
        assert!(check_dates(date("2025-03-10"), None).is_ok());
    }

    #[test]
    fn test_terminal_work_orders_are_locked() {
        let mut work_order = WorkOrder::new(
            "OT-000001".to_string(),
            Uuid::new_v4(),
            None,
            None,
            "Instalación eléctrica".to_string(),
            None,
            None,
            WorkOrderStatus::InProgress,
            None,
            None,
        );
        assert!(ensure_open(&work_order).is_ok());
        work_order.status = WorkOrderStatus::Completed;
        assert_eq!(
            ensure_open(&work_order).unwrap_err().error_code(),
            "INVALID_STATE"
        );
    }
}
