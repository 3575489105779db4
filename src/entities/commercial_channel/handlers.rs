//! Commercial channel HTTP handlers

use super::dto::{CreateCommercialChannelDto, UpdateCommercialChannelDto};
use super::model::CommercialChannel;
use crate::core::validation::filters;
use crate::core::{AppError, AuthContext, DataService};
use crate::server::resource::{CrudResource, ensure_unique};
use crate::server::state::AppState;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
impl CrudResource for CommercialChannel {
    type Create = CreateCommercialChannelDto;
    type Update = UpdateCommercialChannelDto;

    fn service(state: &AppState) -> &Arc<dyn DataService<Self>> {
        &state.commercial_channels
    }

    async fn create_from(
        state: &AppState,
        _auth: &AuthContext,
        input: CreateCommercialChannelDto,
    ) -> Result<Self, AppError> {
        let name = filters::trim(input.name);
        ensure_unique(
            state.commercial_channels.as_ref(),
            "name",
            &name,
            None,
            |c: &CommercialChannel| &c.name,
        )
        .await?;

        Ok(CommercialChannel::new(
            name,
            filters::trim_optional(input.description),
            true,
        ))
    }

    async fn apply_update(
        state: &AppState,
        mut channel: Self,
        input: UpdateCommercialChannelDto,
    ) -> Result<Self, AppError> {
        if let Some(name) = input.name {
            let name = filters::trim(name);
            ensure_unique(
                state.commercial_channels.as_ref(),
                "name",
                &name,
                Some(channel.id),
                |c: &CommercialChannel| &c.name,
            )
            .await?;
            channel.name = name;
        }
        if let Some(description) = input.description {
            channel.description = filters::trim_optional(Some(description));
        }
        if let Some(is_active) = input.is_active {
            channel.is_active = is_active;
        }
        Ok(channel)
    }
}
