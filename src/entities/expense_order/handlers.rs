//! Expense order HTTP handlers

use super::dto::{CreateExpenseOrderDto, ExpenseOrderAuthRequest, UpdateExpenseOrderDto};
use super::model::ExpenseOrder;
use crate::core::auth::{ROLE_ADMIN, ROLE_APPROVER};
use crate::core::validation::filters;
use crate::core::{
    AppError, AuthContext, AuthPolicy, DataService, Entity, EntityError, ExpenseOrderStatus,
    PaginatedResponse, QueryParams, StatusFlow, ValidatedJson, ValidationError,
};
use crate::entities::expense_subcategory::ExpenseSubcategory;
use crate::entities::expense_type::ExpenseType;
use crate::entities::work_order::WorkOrder;
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
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

fn approvers() -> AuthPolicy {
    AuthPolicy::roles(&[ROLE_ADMIN, ROLE_APPROVER])
}

async fn open_work_order(state: &AppState, raw: &str) -> Result<WorkOrder, AppError> {
    let id = parse_field_id("workOrderId", raw)?;
    let work_order = load_reference(state.work_orders.as_ref(), "workOrderId", id).await?;
    if work_order.status.is_terminal() {
        return Err(EntityError::invalid_state(
            "work_order",
            format!(
                "La orden de trabajo {} está en estado {} y no admite gastos",
                work_order.number, work_order.status
            ),
        )
        .into());
    }
    Ok(work_order)
}

async fn active_expense_type(state: &AppState, id: Uuid) -> Result<ExpenseType, AppError> {
    let expense_type = load_reference(state.expense_types.as_ref(), "expenseTypeId", id).await?;
    if !expense_type.is_active {
        return Err(invalid_reference::<ExpenseType>("expenseTypeId", id).into());
    }
    Ok(expense_type)
}

/// Load a subcategory and check it belongs to `expense_type_id`
async fn matching_subcategory(
    state: &AppState,
    id: Uuid,
    expense_type_id: Uuid,
) -> Result<ExpenseSubcategory, AppError> {
    let field = "expenseSubcategoryId";
    let subcategory = load_reference(state.expense_subcategories.as_ref(), field, id).await?;
    if !subcategory.is_active {
        return Err(invalid_reference::<ExpenseSubcategory>(field, id).into());
    }
    if subcategory.expense_type_id != expense_type_id {
        return Err(ValidationError::field(
            field,
            "La subcategoría no pertenece al tipo de gasto seleccionado",
        )
        .into());
    }
    Ok(subcategory)
}

fn ensure_pending(expense: &ExpenseOrder) -> Result<(), EntityError> {
    if expense.status != ExpenseOrderStatus::Pending {
        return Err(EntityError::invalid_state(
            "expense_order",
            format!(
                "La orden de gasto {} está en estado {} y no puede modificarse",
                expense.number, expense.status
            ),
        ));
    }
    Ok(())
}

#[async_trait]
impl CrudResource for ExpenseOrder {
    type Create = CreateExpenseOrderDto;
    type Update = UpdateExpenseOrderDto;

    fn service(state: &AppState) -> &Arc<dyn DataService<Self>> {
        &state.expense_orders
    }

    async fn create_from(
        state: &AppState,
        auth: &AuthContext,
        input: CreateExpenseOrderDto,
    ) -> Result<Self, AppError> {
        let work_order = open_work_order(state, &input.work_order_id).await?;

        let expense_type_id = parse_field_id("expenseTypeId", &input.expense_type_id)?;
        active_expense_type(state, expense_type_id).await?;

        let expense_subcategory_id = match input.expense_subcategory_id.as_deref() {
            Some(raw) => {
                let id = parse_field_id("expenseSubcategoryId", raw)?;
                matching_subcategory(state, id, expense_type_id).await?;
                Some(id)
            }
            None => None,
        };

        let number = next_number(
            &state.sequences.expense_orders,
            state.expense_orders.as_ref(),
            |e| e.number.as_str(),
        )
        .await?;

        Ok(ExpenseOrder::new(
            number,
            work_order.id,
            expense_type_id,
            expense_subcategory_id,
            filters::money(input.amount),
            filters::trim(input.description),
            filters::trim_optional(input.beneficiary),
            ExpenseOrderStatus::Pending,
            auth.user_id().map(str::to_string),
            None,
            None,
            None,
        ))
    }

    async fn apply_update(
        state: &AppState,
        mut expense: Self,
        input: UpdateExpenseOrderDto,
    ) -> Result<Self, AppError> {
        ensure_pending(&expense)?;

        if let Some(raw) = input.expense_type_id.as_deref() {
            let id = parse_field_id("expenseTypeId", raw)?;
            active_expense_type(state, id).await?;
            if id != expense.expense_type_id && input.expense_subcategory_id.is_none() {
                expense.expense_subcategory_id = None;
            }
            expense.expense_type_id = id;
        }
        if let Some(raw) = input.expense_subcategory_id.as_deref() {
            let id = parse_field_id("expenseSubcategoryId", raw)?;
            matching_subcategory(state, id, expense.expense_type_id).await?;
            expense.expense_subcategory_id = Some(id);
        }
        if let Some(amount) = input.amount {
            expense.amount = filters::money(amount);
        }
        if let Some(description) = input.description {
            expense.description = filters::trim(description);
        }
        if let Some(beneficiary) = input.beneficiary {
            expense.beneficiary = filters::trim_optional(Some(beneficiary));
        }
        Ok(expense)
    }

    async fn check_delete(_state: &AppState, expense: &Self) -> Result<(), AppError> {
        match expense.status {
            ExpenseOrderStatus::Pending | ExpenseOrderStatus::Rejected => Ok(()),
            status => Err(EntityError::invalid_state(
                "expense_order",
                format!("No se puede eliminar una orden de gasto en estado {status}"),
            )
            .into()),
        }
    }
}

/// POST /expense-orders/{id}/authorize
pub async fn authorize_expense_order(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<ExpenseOrderAuthRequest>,
) -> Result<Json<ExpenseOrder>, AppError> {
    auth.require(&approvers())?;

    let id = parse_id(&id)?;
    let mut expense = load_active(state.expense_orders.as_ref(), id).await?;
    expense
        .status
        .ensure_transition(input.status, ExpenseOrder::resource_name_singular())?;

    let observation = filters::trim_optional(input.observation);
    if input.status == ExpenseOrderStatus::Rejected && observation.is_none() {
        return Err(ValidationError::field(
            "observation",
            "Debe indicar el motivo del rechazo",
        )
        .into());
    }

    expense.status = input.status;
    expense.authorized_by = auth.user_id().map(str::to_string);
    expense.authorized_at = Some(Utc::now());
    if observation.is_some() {
        expense.observation = observation;
    }
    expense.touch();
    let expense = state.expense_orders.update(&id, expense).await?;

    tracing::info!(
        number = %expense.number,
        status = %expense.status,
        user = auth.user_id().unwrap_or("-"),
        "expense order authorized"
    );
    Ok(Json(expense))
}

/// POST /expense-orders/{id}/pay
pub async fn pay_expense_order(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<ExpenseOrder>, AppError> {
    auth.require(&approvers())?;

    let id = parse_id(&id)?;
    let mut expense = load_active(state.expense_orders.as_ref(), id).await?;
    expense.status.ensure_transition(
        ExpenseOrderStatus::Paid,
        ExpenseOrder::resource_name_singular(),
    )?;

    expense.status = ExpenseOrderStatus::Paid;
    expense.touch();
    let expense = state.expense_orders.update(&id, expense).await?;

    tracing::info!(number = %expense.number, amount = expense.amount, "expense order paid");
    Ok(Json(expense))
}

/// GET /work-orders/{id}/expense-orders
pub async fn list_work_order_expenses(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Value>>, AppError> {
    let params = query_params(query)?;
    let id = parse_id(&id)?;
    load_active(state.work_orders.as_ref(), id).await?;
    list_related(state.expense_orders.as_ref(), "workOrderId", id, &params).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_expenses_are_editable() {
        let mut expense = ExpenseOrder::new(
            "OG-000001".to_string(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            None,
            120_000.0,
            "Combustible".to_string(),
            None,
            ExpenseOrderStatus::Pending,
            None,
            None,
            None,
            None,
        );
        assert!(ensure_pending(&expense).is_ok());

        expense.status = ExpenseOrderStatus::Approved;
        let err = ensure_pending(&expense).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_STATE");
        assert!(err.to_string().contains("OG-000001"));
    }

    #[test]
    fn test_approvers_policy() {
        let approver = AuthContext::User {
            user_id: "u-1".to_string(),
            name: None,
            roles: vec!["approver".to_string()],
        };
        let clerk = AuthContext::User {
            user_id: "u-2".to_string(),
            name: None,
            roles: vec![],
        };
        assert!(approvers().check(&approver));
        assert!(!approvers().check(&clerk));
    }
}
