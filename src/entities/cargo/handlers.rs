//! Cargo HTTP handlers

use super::dto::{CreateCargoDto, UpdateCargoDto};
use super::model::Cargo;
use crate::core::validation::filters;
use crate::core::{AppError, AuthContext, DataService};
use crate::entities::area::Area;
use crate::server::resource::{CrudResource, invalid_reference, load_reference, parse_field_id};
use crate::server::state::AppState;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Cargos can only hang from an active area
async fn active_area(state: &AppState, id: Uuid) -> Result<Area, AppError> {
    let area = load_reference(state.areas.as_ref(), "areaId", id).await?;
    if !area.is_active {
        return Err(invalid_reference::<Area>("areaId", id).into());
    }
    Ok(area)
}

#[async_trait]
impl CrudResource for Cargo {
    type Create = CreateCargoDto;
    type Update = UpdateCargoDto;

    fn service(state: &AppState) -> &Arc<dyn DataService<Self>> {
        &state.cargos
    }

    async fn create_from(
        state: &AppState,
        _auth: &AuthContext,
        input: CreateCargoDto,
    ) -> Result<Self, AppError> {
        let area_id = parse_field_id("areaId", &input.area_id)?;
        active_area(state, area_id).await?;

        Ok(Cargo::new(
            filters::trim(input.name),
            filters::trim_optional(input.description),
            area_id,
            true,
        ))
    }

    async fn apply_update(
        state: &AppState,
        mut cargo: Self,
        input: UpdateCargoDto,
    ) -> Result<Self, AppError> {
        if let Some(area_id) = input.area_id {
            let area_id = parse_field_id("areaId", &area_id)?;
            if area_id != cargo.area_id {
                active_area(state, area_id).await?;
                cargo.area_id = area_id;
            }
        }
        if let Some(name) = input.name {
            cargo.name = filters::trim(name);
        }
        if let Some(description) = input.description {
            cargo.description = filters::trim_optional(Some(description));
        }
        if let Some(is_active) = input.is_active {
            cargo.is_active = is_active;
        }
        Ok(cargo)
    }
}
