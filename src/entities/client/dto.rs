use crate::core::validation::{filters, validators};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateClientDto {
    #[validate(
        length(min = 2, max = 150, message = "El nombre debe tener entre 2 y 150 caracteres"),
        custom(function = "validators::not_blank")
    )]
    #[serde(deserialize_with = "filters::trimmed")]
    pub name: String,

    #[validate(custom(function = "validators::tax_id"))]
    pub tax_id: String,

    #[validate(email(message = "El correo electrónico no es válido"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub email: Option<String>,

    #[validate(custom(function = "validators::phone"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub phone: Option<String>,

    #[validate(length(max = 255, message = "La dirección no puede exceder 255 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub address: Option<String>,

    #[validate(length(max = 100, message = "El nombre de contacto no puede exceder 100 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub contact_name: Option<String>,

    #[validate(custom(function = "validators::uuid"))]
    pub department_id: Option<String>,

    #[validate(custom(function = "validators::uuid"))]
    pub city_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateClientDto {
    #[validate(
        length(min = 2, max = 150, message = "El nombre debe tener entre 2 y 150 caracteres"),
        custom(function = "validators::not_blank")
    )]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub name: Option<String>,

    #[validate(custom(function = "validators::tax_id"))]
    pub tax_id: Option<String>,

    #[validate(email(message = "El correo electrónico no es válido"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub email: Option<String>,

    #[validate(custom(function = "validators::phone"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub phone: Option<String>,

    #[validate(length(max = 255, message = "La dirección no puede exceder 255 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub address: Option<String>,

    #[validate(length(max = 100, message = "El nombre de contacto no puede exceder 100 caracteres"))]
    #[serde(default, deserialize_with = "filters::trimmed_optional")]
    pub contact_name: Option<String>,

    #[validate(custom(function = "validators::uuid"))]
    pub department_id: Option<String>,

    #[validate(custom(function = "validators::uuid"))]
    pub city_id: Option<String>,

    pub is_active: Option<bool>,
}
