use crate::core::WorkOrderStatus;
use crate::core::validation::{filters, validators};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateWorkOrderDto {
    #[validate(custom(function = "validators::uuid"))]
    pub order_id: String,

    #[validate(custom(function = "validators::uuid"))]
    pub cargo_id: Option<String>,

    #[validate(length(max = 150, message = "El responsable no puede exceder 150 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub assignee: Option<String>,

    #[validate(
        length(min = 5, max = 1000, message = "La descripción debe tener entre 5 y 1000 caracteres"),
        custom(function = "validators::not_blank")
    )]
    #[serde(deserialize_with = "filters::trimmed")]
    pub description: String,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateWorkOrderDto {
    #[validate(custom(function = "validators::uuid"))]
    pub cargo_id: Option<String>,

    #[validate(length(max = 150, message = "El responsable no puede exceder 150 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub assignee: Option<String>,

    #[validate(
        length(min = 5, max = 1000, message = "La descripción debe tener entre 5 y 1000 caracteres"),
        custom(function = "validators::not_blank")
    )]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub description: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateWorkOrderStatusDto {
    pub status: WorkOrderStatus,

    #[validate(length(max = 500, message = "La observación no puede exceder 500 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub observation: Option<String>,
}
