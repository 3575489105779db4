//! File HTTP handlers
//!
//! Files do not go through the generic CRUD handlers: uploads arrive as
//! `multipart/form-data` and the bytes are kept in [`ObjectStorage`](crate::storage::ObjectStorage).

use super::model::File;
use super::upload::{DEFAULT_FOLDER, content_disposition, object_key, resolve_mime};
use crate::core::validation::validators;
use crate::core::{
    AppError, AuthContext, Entity, EntityError, PaginatedResponse, QueryParams, RequestError,
    StorageError, ValidationError,
};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::resource::{live, load_active, parse_id, query_params, to_values};
use crate::server::state::AppState;
use axum::{
    Json, Router,
    extract::{
        Multipart, Path, Query, State,
        multipart::{Field, MultipartError},
        rejection::QueryRejection,
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const DEFAULT_URL_TTL_SECS: u64 = 3600;
const MAX_URL_TTL_SECS: u64 = 7 * 24 * 3600;

/// Routes of the `/files` resource
pub struct FileDescriptor;

impl EntityDescriptor for FileDescriptor {
    fn entity_type(&self) -> &str {
        File::resource_name_singular()
    }

    fn plural(&self) -> &str {
        File::resource_name()
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/files", get(list_files).post(upload_file))
            .route("/files/{id}", get(get_file).delete(delete_file))
            .route("/files/{id}/download", get(download_file))
            .route("/files/{id}/url", get(file_url))
    }
}

fn multipart_error(err: MultipartError, limit_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RequestError::PayloadTooLarge { limit_bytes }.into()
    } else {
        RequestError::BadRequest {
            message: err.body_text(),
        }
        .into()
    }
}

struct Upload {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

async fn read_file(field: Field<'_>, limit_bytes: usize) -> Result<Upload, AppError> {
    let file_name = field
        .file_name()
        .map(str::to_string)
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ValidationError::field("file", "El archivo debe tener un nombre"))?;
    let content_type = field.content_type().map(str::to_string);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| multipart_error(e, limit_bytes))?;

    Ok(Upload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    })
}

fn check_folder(folder: String) -> Result<String, ValidationError> {
    let folder = folder.trim().trim_end_matches('/').to_string();
    if folder.is_empty() {
        return Ok(DEFAULT_FOLDER.to_string());
    }
    validators::folder(&folder).map_err(|e| {
        let message = e
            .message
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Carpeta inválida".to_string());
        ValidationError::field("folder", message)
    })?;
    Ok(folder)
}

/// POST /files
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthContext,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<File>), AppError> {
    let limit_bytes = state.upload.max_bytes;
    let mut upload = None;
    let mut folder = DEFAULT_FOLDER.to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit_bytes))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => upload = Some(read_file(field, limit_bytes).await?),
            Some("folder") => {
                folder = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, limit_bytes))?;
            }
            _ => {}
        }
    }

    let upload =
        upload.ok_or_else(|| ValidationError::field("file", "Debe adjuntar un archivo"))?;
    let folder = check_folder(folder)?;

    if upload.bytes.is_empty() {
        return Err(ValidationError::field("file", "El archivo está vacío").into());
    }
    if upload.bytes.len() > limit_bytes {
        return Err(RequestError::PayloadTooLarge { limit_bytes }.into());
    }
    let mime_type = resolve_mime(upload.content_type.as_deref(), &upload.file_name)
        .map_err(|mime_type| RequestError::UnsupportedMediaType { mime_type })?;

    let key = object_key(&folder, &upload.file_name);
    let size = upload.bytes.len() as u64;
    state
        .objects
        .put(&key, upload.bytes, mime_type)
        .await
        .map_err(|e| StorageError::Object {
            key: key.clone(),
            message: format!("{e:#}"),
        })?;

    let record = File::new(
        upload.file_name,
        key.clone(),
        state.objects.public_url(&key),
        mime_type.to_string(),
        size,
        folder,
        auth.user_id().map(str::to_string),
    );
    let record = match state.files.create(record).await {
        Ok(record) => record,
        Err(err) => {
            if let Err(cleanup) = state.objects.delete(&key).await {
                tracing::warn!(%key, error = %cleanup, "failed to remove orphaned object");
            }
            return Err(err.into());
        }
    };

    tracing::info!(
        id = %record.id,
        key = %record.key,
        size = record.size,
        user = auth.user_id().unwrap_or("-"),
        "file uploaded"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /files
pub async fn list_files(
    State(state): State<AppState>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Value>>, AppError> {
    let params = query_params(query)?;
    let files = live(state.files.list().await?);
    Ok(Json(params.apply(to_values(&files)?)))
}

/// GET /files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<File>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(load_active(state.files.as_ref(), id).await?))
}

/// GET /files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let file = load_active(state.files.as_ref(), id).await?;

    let object = state
        .objects
        .fetch(&file.key)
        .await
        .map_err(|e| StorageError::Object {
            key: file.key.clone(),
            message: format!("{e:#}"),
        })?
        .ok_or_else(|| EntityError::not_found("file", id))?;

    let content_type = HeaderValue::from_str(&object.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&content_disposition(&file.original_name))
        .map_err(|e| AppError::Internal(format!("invalid content disposition: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        object.bytes,
    )
        .into_response())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlQuery {
    /// Lifetime of the URL in seconds
    pub expires_in: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrl {
    pub url: String,
    pub expires_in: u64,
}

/// GET /files/{id}/url?expiresIn=
pub async fn file_url(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<UrlQuery>, QueryRejection>,
) -> Result<Json<SignedUrl>, AppError> {
    let Query(query) =
        query.map_err(|rejection| ValidationError::field("expiresIn", rejection.body_text()))?;
    let id = parse_id(&id)?;
    let file = load_active(state.files.as_ref(), id).await?;

    let expires_in = query
        .expires_in
        .unwrap_or(DEFAULT_URL_TTL_SECS)
        .clamp(1, MAX_URL_TTL_SECS);
    let url = state
        .objects
        .signed_url(&file.key, Duration::from_secs(expires_in))
        .await
        .map_err(|e| StorageError::Object {
            key: file.key.clone(),
            message: format!("{e:#}"),
        })?;

    Ok(Json(SignedUrl { url, expires_in }))
}

/// DELETE /files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    let mut file = load_active(state.files.as_ref(), id).await?;

    state
        .objects
        .delete(&file.key)
        .await
        .map_err(|e| StorageError::Object {
            key: file.key.clone(),
            message: format!("{e:#}"),
        })?;

    file.soft_delete();
    state.files.update(&id, file).await?;

    tracing::info!(%id, "file deleted");
    Ok(StatusCode::NO_CONTENT)
}
