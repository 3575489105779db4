//! Generic CRUD handlers shared by every stored resource
//!
//! A resource implements [`CrudResource`] to say how its DTOs turn into
//! records; the handlers here take care of ids, soft deletion, listing and
//! response codes.

use super::state::AppState;
use crate::core::validation::filters;
use crate::core::{
    AppError, AuthContext, DataService, Entity, EntityError, NumberSequence, PaginatedResponse,
    QueryParams, ValidatedJson, ValidationError,
};
use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// A record exposed through `GET/POST /{plural}` and `GET/PATCH/DELETE /{plural}/{id}`
#[async_trait]
pub trait CrudResource: Entity + Unpin {
    type Create: DeserializeOwned + Validate + Send + 'static;
    type Update: DeserializeOwned + Validate + Send + 'static;

    /// The data service holding this resource
    fn service(state: &AppState) -> &Arc<dyn DataService<Self>>;

    /// Build a new record from a validated DTO, checking references
    async fn create_from(
        state: &AppState,
        auth: &AuthContext,
        input: Self::Create,
    ) -> Result<Self, AppError>;

    /// Apply a validated partial update to the current record
    async fn apply_update(
        state: &AppState,
        current: Self,
        input: Self::Update,
    ) -> Result<Self, AppError>;

    /// Reject deletion while dependent records are alive
    async fn check_delete(_state: &AppState, _current: &Self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Routes for the five CRUD operations of `T`
pub fn crud_routes<T: CrudResource>() -> Router<AppState> {
    let collection = format!("/{}", T::resource_name());
    let item = format!("/{}/{{id}}", T::resource_name());

    Router::new()
        .route(&collection, get(list::<T>).post(create::<T>))
        .route(
            &item,
            get(get_one::<T>).patch(update::<T>).delete(delete::<T>),
        )
}

pub async fn list<T: CrudResource>(
    State(state): State<AppState>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Value>>, AppError> {
    let params = query_params(query)?;
    let records = live(T::service(&state).list().await?);
    Ok(Json(params.apply(to_values(&records)?)))
}

pub async fn get_one<T: CrudResource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<T>, AppError> {
    let id = parse_id(&id)?;
    let record = load_active(T::service(&state).as_ref(), id).await?;
    Ok(Json(record))
}

pub async fn create<T: CrudResource>(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(input): ValidatedJson<T::Create>,
) -> Result<(StatusCode, Json<T>), AppError> {
    let record = T::create_from(&state, &auth, input).await?;
    let record = T::service(&state).create(record).await?;

    tracing::info!(
        entity = T::resource_name_singular(),
        id = %record.id(),
        user = auth.user_id().unwrap_or("-"),
        "record created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update<T: CrudResource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<T::Update>,
) -> Result<Json<T>, AppError> {
    let id = parse_id(&id)?;
    let service = T::service(&state);
    let current = load_active(service.as_ref(), id).await?;

    let mut record = T::apply_update(&state, current, input).await?;
    record.touch();
    let record = service.update(&id, record).await?;

    tracing::info!(entity = T::resource_name_singular(), %id, "record updated");
    Ok(Json(record))
}

pub async fn delete<T: CrudResource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    let service = T::service(&state);
    let mut record = load_active(service.as_ref(), id).await?;

    T::check_delete(&state, &record).await?;
    record.soft_delete();
    service.update(&id, record).await?;

    tracing::info!(entity = T::resource_name_singular(), %id, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// List the live `T` records whose `field` holds `parent`
pub async fn list_related<T: Entity>(
    service: &dyn DataService<T>,
    field: &str,
    parent: Uuid,
    params: &QueryParams,
) -> Result<Json<PaginatedResponse<Value>>, AppError> {
    let records = children(service, field, parent).await?;
    Ok(Json(params.apply(to_values(&records)?)))
}

/// Live `T` records whose `field` holds `parent`
pub async fn children<T: Entity>(
    service: &dyn DataService<T>,
    field: &str,
    parent: Uuid,
) -> Result<Vec<T>, AppError> {
    let records = service
        .search(field, &Value::String(parent.to_string()))
        .await?;
    Ok(live(records))
}

/// Reserve the next document number of `sequence`
///
/// The first call seeds the counter from every number already stored,
/// soft-deleted records included, so numbers are never reused.
pub async fn next_number<T: Entity>(
    sequence: &NumberSequence,
    service: &dyn DataService<T>,
    number: fn(&T) -> &str,
) -> Result<String, AppError> {
    let next = sequence
        .next_with(|| async {
            let records = service.list().await?;
            Ok(records.iter().map(|r| number(r).to_string()).collect())
        })
        .await?;
    Ok(next)
}

/// Unwrap the list query or report it as a validation error
pub fn query_params(
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<QueryParams, ValidationError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ValidationError::field("query", rejection.body_text()))
}

/// Parse a path id
pub fn parse_id(raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidId(raw.to_string()))
}

/// Parse an id carried in a DTO field
pub fn parse_field_id(field: &str, raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ValidationError::field(field, format!("'{field}' debe ser un UUID válido")))
}

/// Load a record that exists and is not soft-deleted
pub async fn load_active<T: Entity>(
    service: &dyn DataService<T>,
    id: Uuid,
) -> Result<T, AppError> {
    service
        .get(&id)
        .await?
        .filter(|record| !record.is_deleted())
        .ok_or_else(|| EntityError::not_found(T::resource_name_singular(), id).into())
}

/// Load the record a foreign key points to
pub async fn load_reference<T: Entity>(
    service: &dyn DataService<T>,
    field: &str,
    id: Uuid,
) -> Result<T, AppError> {
    service
        .get(&id)
        .await?
        .filter(|record| !record.is_deleted())
        .ok_or_else(|| invalid_reference::<T>(field, id).into())
}

pub fn invalid_reference<T: Entity>(field: &str, id: Uuid) -> EntityError {
    EntityError::InvalidReference {
        entity_type: T::resource_name_singular().to_string(),
        field: field.to_string(),
        id: id.to_string(),
    }
}

/// Fail with 409 when another live record already uses `value`
///
/// Comparison is case-insensitive and ignores surrounding whitespace.
pub async fn ensure_unique<T, F>(
    service: &dyn DataService<T>,
    field: &str,
    value: &str,
    except: Option<Uuid>,
    key: F,
) -> Result<(), AppError>
where
    T: Entity,
    F: Fn(&T) -> &str,
{
    let wanted = filters::unique_key(value);
    let taken = service.list().await?.into_iter().any(|record| {
        !record.is_deleted()
            && Some(record.id()) != except
            && filters::unique_key(key(&record)) == wanted
    });

    if taken {
        return Err(EntityError::AlreadyExists {
            entity_type: T::resource_name_singular().to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Drop soft-deleted records
pub fn live<T: Entity>(records: Vec<T>) -> Vec<T> {
    records
        .into_iter()
        .filter(|record| !record.is_deleted())
        .collect()
}

pub fn to_values<T: Serialize>(records: &[T]) -> Result<Vec<Value>, AppError> {
    records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()
        .map_err(|e| AppError::Internal(format!("failed to serialize record: {e}")))
}
