//! Expense type HTTP handlers

use super::dto::{CreateExpenseTypeDto, UpdateExpenseTypeDto};
use super::model::ExpenseType;
use crate::core::validation::filters;
use crate::core::{AppError, AuthContext, DataService, EntityError, PaginatedResponse, QueryParams};
use crate::entities::expense_subcategory::ExpenseSubcategory;
use crate::server::resource::{
    CrudResource, children, ensure_unique, list_related, load_active, parse_id, query_params,
};
use crate::server::state::AppState;
use async_trait::async_trait;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde_json::Value;
use std::sync::Arc;

#[async_trait]
impl CrudResource for ExpenseType {
    type Create = CreateExpenseTypeDto;
    type Update = UpdateExpenseTypeDto;

    fn service(state: &AppState) -> &Arc<dyn DataService<Self>> {
        &state.expense_types
    }

    async fn create_from(
        state: &AppState,
        _auth: &AuthContext,
        input: CreateExpenseTypeDto,
    ) -> Result<Self, AppError> {
        let name = filters::trim(input.name);
        ensure_unique(
            state.expense_types.as_ref(),
            "name",
            &name,
            None,
            |t: &ExpenseType| &t.name,
        )
        .await?;

        Ok(ExpenseType::new(
            name,
            filters::trim_optional(input.description),
            true,
        ))
    }

    async fn apply_update(
        state: &AppState,
        mut expense_type: Self,
        input: UpdateExpenseTypeDto,
    ) -> Result<Self, AppError> {
        if let Some(name) = input.name {
            let name = filters::trim(name);
            ensure_unique(
                state.expense_types.as_ref(),
                "name",
                &name,
                Some(expense_type.id),
                |t: &ExpenseType| &t.name,
            )
            .await?;
            expense_type.name = name;
        }
        if let Some(description) = input.description {
            expense_type.description = filters::trim_optional(Some(description));
        }
        if let Some(is_active) = input.is_active {
            expense_type.is_active = is_active;
        }
        Ok(expense_type)
    }

    async fn check_delete(state: &AppState, expense_type: &Self) -> Result<(), AppError> {
        let active = children(
            state.expense_subcategories.as_ref(),
            "expenseTypeId",
            expense_type.id,
        )
        .await?
        .into_iter()
        .filter(|s: &ExpenseSubcategory| s.is_active)
        .count();

        if active > 0 {
            return Err(EntityError::invalid_state(
                "expense_type",
                format!("El tipo de gasto tiene {active} subcategoría(s) activa(s)"),
            )
            .into());
        }
        Ok(())
    }
}

/// GET /expense-types/{id}/subcategories
pub async fn list_subcategories(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Value>>, AppError> {
    let params = query_params(query)?;
    let id = parse_id(&id)?;
    load_active(state.expense_types.as_ref(), id).await?;
    list_related(state.expense_subcategories.as_ref(), "expenseTypeId", id, &params).await
}
