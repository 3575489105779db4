//! Custom field validators used by the DTOs through
//! `#[validate(custom(function = ...))]`

use super::filters;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use uuid::Uuid;
use validator::ValidationError;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Validator: string is a UUID
pub fn uuid(value: &str) -> Result<(), ValidationError> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| invalid("uuid", "Debe ser un UUID válido"))
}

/// Validator: string has at least one non-whitespace character
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(invalid("not_blank", "No puede estar vacío"))
    } else {
        Ok(())
    }
}

/// Validator: amount is still above zero once rounded to cents
pub fn positive_money<T: std::borrow::Borrow<f64>>(value: T) -> Result<(), ValidationError> {
    let value = *value.borrow();
    if value.is_finite() && filters::money(value) > 0.0 {
        Ok(())
    } else {
        Err(invalid("range", "El monto debe ser mayor que cero"))
    }
}

/// Validator: Colombian NIT, 5 to 15 digits with an optional `-d` check digit
pub fn tax_id(value: &str) -> Result<(), ValidationError> {
    static TAX_ID: OnceLock<Regex> = OnceLock::new();
    let regex = TAX_ID.get_or_init(|| Regex::new(r"^\d{5,15}(-\d)?$").expect("valid regex"));
    if regex.is_match(value.trim()) {
        Ok(())
    } else {
        Err(invalid(
            "tax_id",
            "El NIT debe tener entre 5 y 15 dígitos y un dígito de verificación opcional",
        ))
    }
}

/// Validator: phone made of 7 to 20 digits, spaces, `+`, `(`, `)` or `-`
pub fn phone(value: &str) -> Result<(), ValidationError> {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE.get_or_init(|| Regex::new(r"^\+?[0-9 ()\-]{7,20}$").expect("valid regex"));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if regex.is_match(value) && digits >= 7 {
        Ok(())
    } else {
        Err(invalid("phone", "El teléfono no tiene un formato válido"))
    }
}

/// Validator: storage folder, lowercase path segments without traversal
pub fn folder(value: &str) -> Result<(), ValidationError> {
    static FOLDER: OnceLock<Regex> = OnceLock::new();
    let regex = FOLDER.get_or_init(|| Regex::new(r"^[a-z0-9_\-/]{1,50}$").expect("valid regex"));
    if regex.is_match(value) && !value.contains("..") && !value.starts_with('/') {
        Ok(())
    } else {
        Err(invalid(
            "folder",
            "La carpeta solo admite minúsculas, dígitos, '-', '_' y '/'",
        ))
    }
}
