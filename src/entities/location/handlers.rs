//! Location catalog HTTP handlers

use crate::core::{AppError, EntityError, PaginatedResponse, QueryParams};
use crate::server::resource::{parse_field_id, parse_id, query_params, to_values};
use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityFilter {
    pub department_id: Option<String>,
}

/// GET /departments
pub async fn list_departments(
    State(state): State<AppState>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Value>>, AppError> {
    let params = query_params(query)?;
    Ok(Json(params.apply(to_values(state.locations.departments())?)))
}

/// GET /departments/{id}/cities
pub async fn list_department_cities(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Value>>, AppError> {
    let params = query_params(query)?;
    let id = parse_id(&id)?;
    if state.locations.department(id).is_none() {
        return Err(EntityError::not_found("department", id).into());
    }
    Ok(Json(params.apply(to_values(&state.locations.cities_of(id))?)))
}

/// GET /cities?departmentId=
pub async fn list_cities(
    State(state): State<AppState>,
    Query(filter): Query<CityFilter>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Value>>, AppError> {
    let params = query_params(query)?;
    let cities = match filter.department_id.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => {
            let department = parse_field_id("departmentId", raw)?;
            to_values(&state.locations.cities_of(department))?
        }
        None => to_values(state.locations.cities())?,
    };
    Ok(Json(params.apply(cities)))
}
