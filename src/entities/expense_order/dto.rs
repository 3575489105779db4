use crate::core::ExpenseOrderStatus;
use crate::core::validation::{filters, validators};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateExpenseOrderDto {
    #[validate(custom(function = "validators::uuid"))]
    pub work_order_id: String,

    #[validate(custom(function = "validators::uuid"))]
    pub expense_type_id: String,

    #[validate(custom(function = "validators::uuid"))]
    pub expense_subcategory_id: Option<String>,

    #[validate(custom(function = "validators::positive_money"))]
    pub amount: f64,

    #[validate(
        length(min = 3, max = 500, message = "La descripción debe tener entre 3 y 500 caracteres"),
        custom(function = "validators::not_blank")
    )]
    #[serde(deserialize_with = "filters::trimmed")]
    pub description: String,

    #[validate(length(max = 150, message = "El beneficiario no puede exceder 150 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub beneficiary: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateExpenseOrderDto {
    #[validate(custom(function = "validators::uuid"))]
    pub expense_type_id: Option<String>,

    #[validate(custom(function = "validators::uuid"))]
    pub expense_subcategory_id: Option<String>,

    #[validate(custom(function = "validators::positive_money"))]
    pub amount: Option<f64>,

    #[validate(
        length(min = 3, max = 500, message = "La descripción debe tener entre 3 y 500 caracteres"),
        custom(function = "validators::not_blank")
    )]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub description: Option<String>,

    #[validate(length(max = 150, message = "El beneficiario no puede exceder 150 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub beneficiary: Option<String>,
}

/// Decision of an approver on a pending expense order
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpenseOrderAuthRequest {
    #[validate(custom(function = "decision"))]
    pub status: ExpenseOrderStatus,

    #[validate(length(max = 500, message = "La observación no puede exceder 500 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub observation: Option<String>,
}

fn decision(status: &ExpenseOrderStatus) -> Result<(), validator::ValidationError> {
    match status {
        ExpenseOrderStatus::Approved | ExpenseOrderStatus::Rejected => Ok(()),
        _ => Err(validator::ValidationError::new("decision")
            .with_message("El estado debe ser APPROVED o REJECTED".into())),
    }
}
