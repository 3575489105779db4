//! Area HTTP handlers

use super::dto::{CreateAreaDto, UpdateAreaDto};
use super::model::Area;
use crate::core::validation::filters;
use crate::core::{AppError, AuthContext, DataService, EntityError, PaginatedResponse, QueryParams};
use crate::entities::cargo::Cargo;
use crate::server::resource::{
    CrudResource, children, ensure_unique, list_related, load_active, parse_id, query_params,
};
use crate::server::state::AppState;
use async_trait::async_trait;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde_json::Value;
use std::sync::Arc;

#[async_trait]
impl CrudResource for Area {
    type Create = CreateAreaDto;
    type Update = UpdateAreaDto;

    fn service(state: &AppState) -> &Arc<dyn DataService<Self>> {
        &state.areas
    }

    async fn create_from(
        state: &AppState,
        _auth: &AuthContext,
        input: CreateAreaDto,
    ) -> Result<Self, AppError> {
        let name = filters::trim(input.name);
        ensure_unique(state.areas.as_ref(), "name", &name, None, |a: &Area| &a.name).await?;

        Ok(Area::new(name, filters::trim_optional(input.description), true))
    }

    async fn apply_update(
        state: &AppState,
        mut area: Self,
        input: UpdateAreaDto,
    ) -> Result<Self, AppError> {
        if let Some(name) = input.name {
            let name = filters::trim(name);
            ensure_unique(state.areas.as_ref(), "name", &name, Some(area.id), |a: &Area| {
                &a.name
            })
            .await?;
            area.name = name;
        }
        if let Some(description) = input.description {
            area.description = filters::trim_optional(Some(description));
        }
        if let Some(is_active) = input.is_active {
            area.is_active = is_active;
        }
        Ok(area)
    }

    async fn check_delete(state: &AppState, area: &Self) -> Result<(), AppError> {
        let cargos = children(state.cargos.as_ref(), "areaId", area.id).await?;
        let active = cargos.iter().filter(|c: &&Cargo| c.is_active).count();
        if active > 0 {
            return Err(EntityError::invalid_state(
                "area",
                format!("El área tiene {active} cargo(s) activo(s) y no puede eliminarse"),
            )
            .into());
        }
        Ok(())
    }
}

/// GET /areas/{id}/cargos
pub async fn list_area_cargos(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Value>>, AppError> {
    let params = query_params(query)?;
    let id = parse_id(&id)?;
    load_active(state.areas.as_ref(), id).await?;
    list_related(state.cargos.as_ref(), "areaId", id, &params).await
}
