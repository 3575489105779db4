//! Typed error handling for the service
//!
//! Every handler returns `Result<_, AppError>`. Each category maps to an HTTP
//! status code and a stable machine-readable code so that the front-end can
//! branch on errors without parsing messages.
//!
//! # Error Categories
//!
//! - [`EntityError`]: lookups, references, duplicates and lifecycle rules
//! - [`ValidationError`]: request bodies and path parameters
//! - [`StorageError`]: persistence and object storage backends
//! - [`RequestError`]: authentication, authorization and upload limits
//!
//! # Example
//!
//! ```rust,ignore
//! let area = state.areas.get(&id).await?.ok_or(EntityError::NotFound {
//!     entity_type: "area".to_string(),
//!     id,
//! })?;
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// The main error type of the service
#[derive(Debug, Error)]
pub enum AppError {
    /// Entity-related errors (CRUD operations and lifecycle rules)
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Entity(e) => e.status_code(),
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Request(e) => e.status_code(),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Entity(e) => e.error_code(),
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Request(e) => e.error_code(),
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entityType": entity_type,
                    "id": id.to_string()
                }))
            }
            AppError::Entity(EntityError::InvalidReference { field, id, .. }) => {
                Some(serde_json::json!({
                    "field": field,
                    "id": id.to_string()
                }))
            }
            AppError::Entity(EntityError::InvalidTransition { from, to, .. }) => {
                Some(serde_json::json!({ "from": from, "to": to }))
            }
            AppError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            AppError::Validation(ValidationError::InvalidBody(_)) => {
                Some(serde_json::json!({ "reason": "INVALID_BODY" }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        (status, Json(self.to_response())).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Storage(StorageError::Backend {
            message: format!("{err:#}"),
        })
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug, Error)]
pub enum EntityError {
    /// Entity was not found (or was soft-deleted)
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: Uuid },

    /// A foreign key in the request points to a missing or inactive record
    #[error("{field} references a {entity_type} that does not exist: '{id}'")]
    InvalidReference {
        entity_type: String,
        field: String,
        id: String,
    },

    /// A unique field already holds the given value
    #[error("{entity_type} with {field} '{value}' already exists")]
    AlreadyExists {
        entity_type: String,
        field: String,
        value: String,
    },

    /// The requested status change is not part of the status machine
    #[error("{entity_type} cannot move from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        from: String,
        to: String,
    },

    /// The operation is not allowed in the entity's current state
    #[error("{message}")]
    InvalidState {
        entity_type: String,
        message: String,
    },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::InvalidReference { .. } => StatusCode::BAD_REQUEST,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
            EntityError::InvalidTransition { .. } => StatusCode::CONFLICT,
            EntityError::InvalidState { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::InvalidReference { .. } => "INVALID_REFERENCE",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
            EntityError::InvalidTransition { .. } => "INVALID_STATUS_TRANSITION",
            EntityError::InvalidState { .. } => "INVALID_STATE",
        }
    }

    /// Shorthand for a missing record
    pub fn not_found(entity_type: &str, id: Uuid) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id,
        }
    }

    /// Shorthand for a rule violated by the current lifecycle state
    pub fn invalid_state(entity_type: &str, message: impl Into<String>) -> Self {
        EntityError::InvalidState {
            entity_type: entity_type.to_string(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more fields failed their constraints
    #[error("Validation failed for {} field(s)", .0.len())]
    FieldErrors(BTreeMap<String, Vec<String>>),

    /// The body could not be parsed into the expected shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// A path parameter is not a valid UUID
    #[error("Invalid id '{0}': expected a UUID")]
    InvalidId(String),
}

impl ValidationError {
    /// Build a single-field error
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), vec![message.into()]);
        ValidationError::FieldErrors(errors)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Data service failure
    #[error("Storage error: {message}")]
    Backend { message: String },

    /// Object storage failure
    #[error("Object storage error on '{key}': {message}")]
    Object { key: String, message: String },
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to the HTTP request itself
#[derive(Debug, Error)]
pub enum RequestError {
    /// Missing or invalid credentials
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Authenticated but not allowed
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Upload exceeds the configured limit
    #[error("File exceeds the maximum size of {limit_bytes} bytes")]
    PayloadTooLarge { limit_bytes: usize },

    /// Upload content type is not accepted
    #[error("Unsupported media type: {mime_type}")]
    UnsupportedMediaType { mime_type: String },

    /// Multipart payload is malformed or incomplete
    #[error("Bad request: {message}")]
    BadRequest { message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RequestError::Forbidden { .. } => StatusCode::FORBIDDEN,
            RequestError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RequestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RequestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
            RequestError::Forbidden { .. } => "FORBIDDEN",
            RequestError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            RequestError::UnsupportedMediaType { .. } => "UNSUPPORTED_MEDIA_TYPE",
            RequestError::BadRequest { .. } => "BAD_REQUEST",
        }
    }
}
