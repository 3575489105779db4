//! Expense subcategory HTTP handlers

use super::dto::{CreateExpenseSubcategoryDto, UpdateExpenseSubcategoryDto};
use super::model::ExpenseSubcategory;
use crate::core::validation::filters;
use crate::core::{AppError, AuthContext, DataService, EntityError};
use crate::entities::expense_type::ExpenseType;
use crate::server::resource::{
    CrudResource, invalid_reference, live, load_reference, parse_field_id,
};
use crate::server::state::AppState;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
impl CrudResource for ExpenseSubcategory {
    type Create = CreateExpenseSubcategoryDto;
    type Update = UpdateExpenseSubcategoryDto;

    fn service(state: &AppState) -> &Arc<dyn DataService<Self>> {
        &state.expense_subcategories
    }

    async fn create_from(
        state: &AppState,
        _auth: &AuthContext,
        input: CreateExpenseSubcategoryDto,
    ) -> Result<Self, AppError> {
        let type_id = parse_field_id("expenseTypeId", &input.expense_type_id)?;
        let expense_type =
            load_reference(state.expense_types.as_ref(), "expenseTypeId", type_id).await?;
        if !expense_type.is_active {
            return Err(invalid_reference::<ExpenseType>("expenseTypeId", type_id).into());
        }

        let name = filters::trim(input.name);
        let siblings = live(
            state
                .expense_subcategories
                .search("expenseTypeId", &serde_json::json!(type_id))
                .await?,
        );
        let wanted = filters::unique_key(&name);
        let duplicate = siblings
            .iter()
            .any(|s| filters::unique_key(&s.name) == wanted);
        if duplicate {
            return Err(EntityError::AlreadyExists {
                entity_type: "expense_subcategory".to_string(),
                field: "name".to_string(),
                value: name,
            }
            .into());
        }

        Ok(ExpenseSubcategory::new(
            name,
            filters::trim_optional(input.description),
            type_id,
            true,
        ))
    }

    async fn apply_update(
        _state: &AppState,
        mut subcategory: Self,
        input: UpdateExpenseSubcategoryDto,
    ) -> Result<Self, AppError> {
        if let Some(name) = input.name {
            subcategory.name = filters::trim(name);
        }
        if let Some(description) = input.description {
            subcategory.description = filters::trim_optional(Some(description));
        }
        if let Some(is_active) = input.is_active {
            subcategory.is_active = is_active;
        }
        Ok(subcategory)
    }
}
