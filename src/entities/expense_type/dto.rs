use crate::core::validation::{filters, validators};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateExpenseTypeDto {
    #[validate(
        length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres"),
        custom(function = "validators::not_blank")
    )]
    #[serde(deserialize_with = "filters::trimmed")]
    pub name: String,

    #[validate(length(max = 500, message = "La descripción no puede exceder 500 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateExpenseTypeDto {
    #[validate(
        length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres"),
        custom(function = "validators::not_blank")
    )]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "La descripción no puede exceder 500 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub description: Option<String>,

    pub is_active: Option<bool>,
}
