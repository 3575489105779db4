//! Normalization applied to validated input before it is stored

use serde::{Deserialize, Deserializer};

/// Filter: trim surrounding whitespace
pub fn trim(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

/// Filter: trim an optional string, mapping blank values to `None`
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value.map(trim).filter(|s| !s.is_empty())
}

/// Serde adapter trimming a string while the body is parsed
///
/// Length rules on the DTO then apply to the value that gets stored.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(trim)
}

/// Serde adapter for optional text fields; pair it with `#[serde(default)]`
pub fn trimmed_optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|value| value.map(trim))
}

/// Filter: trim and lowercase an email address
pub fn email(value: Option<String>) -> Option<String> {
    trim_optional(value).map(|s| s.to_lowercase())
}

/// Filter: round a money amount to two decimals
pub fn money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Key used for case-insensitive uniqueness checks
pub fn unique_key(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_removes_whitespace() {
        assert_eq!(trim("  hola  ".to_string()), "hola");
        assert_eq!(trim("hola".to_string()), "hola");
    }

    #[test]
    fn test_trim_optional_drops_blank() {
        assert_eq!(trim_optional(Some("   ".to_string())), None);
        assert_eq!(trim_optional(None), None);
        assert_eq!(trim_optional(Some(" a ".to_string())), Some("a".to_string()));
    }

    #[test]
    fn test_email_is_lowercased() {
        assert_eq!(
            email(Some(" Ventas@Empresa.COM ".to_string())),
            Some("ventas@empresa.com".to_string())
        );
    }

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(money(19.999), 20.0);
        assert_eq!(money(3.14159), 3.14);
        assert_eq!(money(42.0), 42.0);
    }

    #[derive(Debug, Deserialize)]
    struct Named {
        #[serde(deserialize_with = "trimmed")]
        name: String,
        #[serde(default, deserialize_with = "trimmed_optional")]
        note: Option<String>,
    }

    #[test]
    fn test_trimmed_fields_are_normalized_on_parse() {
        let parsed: Named = serde_json::from_str(r#"{"name":"  a ","note":"  "}"#).unwrap();
        assert_eq!(parsed.name, "a");
        assert_eq!(parsed.note.as_deref(), Some(""));

        let parsed: Named = serde_json::from_str(r#"{"name":"b"}"#).unwrap();
        assert_eq!(parsed.note, None);
    }

    #[test]
    fn test_unique_key() {
        assert_eq!(unique_key("  Operaciones "), "operaciones");
    }
}
