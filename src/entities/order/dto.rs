use crate::core::OrderStatus;
use crate::core::validation::{filters, validators};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateOrderDto {
    #[validate(custom(function = "validators::uuid"))]
    pub client_id: String,

    #[validate(custom(function = "validators::uuid"))]
    pub commercial_channel_id: Option<String>,

    #[validate(
        length(min = 5, max = 1000, message = "La descripción debe tener entre 5 y 1000 caracteres"),
        custom(function = "validators::not_blank")
    )]
    #[serde(deserialize_with = "filters::trimmed")]
    pub description: String,

    #[validate(length(max = 500, message = "La condición especial no puede exceder 500 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub special_condition: Option<String>,

    #[validate(range(min = 0.0, message = "El valor estimado no puede ser negativo"))]
    pub estimated_value: Option<f64>,

    pub delivery_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateOrderDto {
    #[validate(custom(function = "validators::uuid"))]
    pub client_id: Option<String>,

    #[validate(custom(function = "validators::uuid"))]
    pub commercial_channel_id: Option<String>,

    #[validate(
        length(min = 5, max = 1000, message = "La descripción debe tener entre 5 y 1000 caracteres"),
        custom(function = "validators::not_blank")
    )]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub description: Option<String>,

    #[validate(length(max = 500, message = "La condición especial no puede exceder 500 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub special_condition: Option<String>,

    #[validate(range(min = 0.0, message = "El valor estimado no puede ser negativo"))]
    pub estimated_value: Option<f64>,

    pub delivery_date: Option<NaiveDate>,
}

/// Changes proposed for an order that is past `PENDING`
///
/// Stored as-is inside the edit request until it is reviewed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validators::uuid"))]
    pub commercial_channel_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 5, max = 1000, message = "La descripción debe tener entre 5 y 1000 caracteres"),
        custom(function = "validators::not_blank")
    )]
    #[serde(deserialize_with = "filters::trimmed_optional")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "La condición especial no puede exceder 500 caracteres"))]
    #[serde(deserialize_with = "filters::trimmed_optional")]
    pub special_condition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "El valor estimado no puede ser negativo"))]
    pub estimated_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
}

impl OrderChanges {
    pub fn is_empty(&self) -> bool {
        self.commercial_channel_id.is_none()
            && self.description.is_none()
            && self.special_condition.is_none()
            && self.estimated_value.is_none()
            && self.delivery_date.is_none()
    }
}

impl From<UpdateOrderDto> for OrderChanges {
    fn from(dto: UpdateOrderDto) -> Self {
        Self {
            commercial_channel_id: dto.commercial_channel_id,
            description: dto.description,
            special_condition: dto.special_condition,
            estimated_value: dto.estimated_value,
            delivery_date: dto.delivery_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateOrderStatusDto {
    pub status: OrderStatus,

    #[validate(length(max = 500, message = "El motivo no puede exceder 500 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub reason: Option<String>,
}
