use crate::core::validation::{filters, validators};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCargoDto {
    #[validate(
        length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres"),
        custom(function = "validators::not_blank")
    )]
    #[serde(deserialize_with = "filters::trimmed")]
    pub name: String,

    #[validate(length(max = 500, message = "La descripción no puede exceder 500 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub description: Option<String>,

    #[validate(custom(function = "validators::uuid"))]
    pub area_id: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCargoDto {
    #[validate(
        length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres"),
        custom(function = "validators::not_blank")
    )]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "La descripción no puede exceder 500 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub description: Option<String>,

    #[validate(custom(function = "validators::uuid"))]
    pub area_id: Option<String>,

    pub is_active: Option<bool>,
}
