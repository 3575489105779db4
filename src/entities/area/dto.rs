use crate::core::validation::{filters, validators};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAreaDto {
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
pub struct UpdateAreaDto {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::validate;

    fn create(name: &str) -> CreateAreaDto {
        CreateAreaDto {
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_name_bounds() {
        assert!(validate(&create("Op")).is_ok());
        assert!(validate(&create(&"a".repeat(100))).is_ok());
        assert!(validate(&create("O")).is_err());
        assert!(validate(&create(&"a".repeat(101))).is_err());
        assert!(validate(&create("   ")).is_err());
    }

    #[test]
    fn test_description_limit() {
        let dto = CreateAreaDto {
            name: "Compras".to_string(),
            description: Some("x".repeat(501)),
        };
        let err = validate(&dto).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed for 1 field(s)"
        );
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<CreateAreaDto>(r#"{"name":"Compras","budget":1}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_update_fields_are_optional() {
        let dto: UpdateAreaDto = serde_json::from_str(r#"{"isActive":false}"#).unwrap();
        assert!(validate(&dto).is_ok());
        assert_eq!(dto.is_active, Some(false));
    }
}
