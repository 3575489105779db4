use crate::core::validation::filters;
use crate::entities::order::OrderChanges;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateOrderEditRequestDto {
    #[validate(nested)]
    pub changes: OrderChanges,

    #[validate(length(min = 10, max = 500, message = "El motivo debe tener entre 10 y 500 caracteres"))]
    #[serde(deserialize_with = "filters::trimmed")]
    pub reason: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReviewOrderEditRequestDto {
    pub approved: bool,

    #[validate(length(max = 500, message = "La nota de revisión no puede exceder 500 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub review_note: Option<String>,
}
