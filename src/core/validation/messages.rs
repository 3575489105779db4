//! Field-level messages for failed validations
//!
//! Rules that carry an explicit `message` keep it verbatim; the others get a
//! Spanish default built from the rule code and its parameters. Field names
//! are reported in camelCase, matching the wire format.

use std::collections::BTreeMap;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Key used for struct-level (schema) rules
pub const BODY_KEY: &str = "body";

/// Flatten nested validation errors into `field -> messages`
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    collect(errors, "", &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut BTreeMap<String, Vec<String>>) {
    for (field, kind) in errors.errors() {
        let name = if field.as_ref() == "__all__" {
            BODY_KEY.to_string()
        } else {
            to_camel_case(field.as_ref())
        };
        let path = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}.{name}")
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                let messages = out.entry(path.clone()).or_insert_with(Vec::new);
                messages.extend(list.iter().map(|error| describe(&path, error)));
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

/// Human-readable message for one failed rule
pub fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let param = |key: &str| error.params.get(key).map(|value| value.to_string());

    match error.code.as_ref() {
        "length" => match (param("min"), param("max"), param("equal")) {
            (_, _, Some(equal)) => {
                format!("'{field}' debe tener exactamente {equal} caracteres")
            }
            (Some(min), Some(max), None) => {
                format!("'{field}' debe tener entre {min} y {max} caracteres")
            }
            (Some(min), None, None) => format!("'{field}' debe tener al menos {min} caracteres"),
            (None, Some(max), None) => format!("'{field}' no puede exceder {max} caracteres"),
            (None, None, None) => format!("'{field}' tiene una longitud inválida"),
        },
        "range" => match (param("min"), param("max"), param("exclusive_min")) {
            (_, _, Some(min)) => format!("'{field}' debe ser mayor que {min}"),
            (Some(min), Some(max), None) => {
                format!("'{field}' debe estar entre {min} y {max}")
            }
            (Some(min), None, None) => format!("'{field}' debe ser mayor o igual a {min}"),
            (None, Some(max), None) => format!("'{field}' debe ser menor o igual a {max}"),
            (None, None, None) => format!("'{field}' está fuera de rango"),
        },
        "email" => format!("'{field}' debe ser un correo electrónico válido"),
        "required" => format!("'{field}' es obligatorio"),
        "uuid" => format!("'{field}' debe ser un UUID válido"),
        code => format!("'{field}' no es válido ({code})"),
    }
}

/// `special_condition` -> `specialCondition`
pub fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}
