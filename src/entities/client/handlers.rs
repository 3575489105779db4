//! Client HTTP handlers

use super::dto::{CreateClientDto, UpdateClientDto};
use super::model::Client;
use crate::core::validation::filters;
use crate::core::{AppError, AuthContext, DataService, EntityError, StatusFlow, ValidationError};
use crate::entities::location::LocationCatalog;
use crate::server::resource::{CrudResource, children, ensure_unique, parse_field_id};
use crate::server::state::AppState;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Check the department/city pair against the catalog
///
/// A city without a department fills in its own department.
pub fn resolve_location(
    catalog: &LocationCatalog,
    department_id: Option<Uuid>,
    city_id: Option<Uuid>,
) -> Result<(Option<Uuid>, Option<Uuid>), AppError> {
    if let Some(id) = department_id {
        if catalog.department(id).is_none() {
            return Err(EntityError::InvalidReference {
                entity_type: "department".to_string(),
                field: "departmentId".to_string(),
                id: id.to_string(),
            }
            .into());
        }
    }

    let Some(city_id) = city_id else {
        return Ok((department_id, None));
    };
    let city = catalog
        .city(city_id)
        .ok_or_else(|| EntityError::InvalidReference {
            entity_type: "city".to_string(),
            field: "cityId".to_string(),
            id: city_id.to_string(),
        })?;

    match department_id {
        Some(department) if department != city.department_id => Err(ValidationError::field(
            "cityId",
            "La ciudad no pertenece al departamento seleccionado",
        )
        .into()),
        _ => Ok((Some(city.department_id), Some(city.id))),
    }
}

fn optional_id(field: &str, raw: Option<&str>) -> Result<Option<Uuid>, ValidationError> {
    raw.map(|value| parse_field_id(field, value)).transpose()
}

#[async_trait]
impl CrudResource for Client {
    type Create = CreateClientDto;
    type Update = UpdateClientDto;

    fn service(state: &AppState) -> &Arc<dyn DataService<Self>> {
        &state.clients
    }

    async fn create_from(
        state: &AppState,
        _auth: &AuthContext,
        input: CreateClientDto,
    ) -> Result<Self, AppError> {
        let tax_id = filters::trim(input.tax_id);
        ensure_unique(state.clients.as_ref(), "taxId", &tax_id, None, |c: &Client| {
            &c.tax_id
        })
        .await?;

        let (department_id, city_id) = resolve_location(
            &state.locations,
            optional_id("departmentId", input.department_id.as_deref())?,
            optional_id("cityId", input.city_id.as_deref())?,
        )?;

        Ok(Client::new(
            filters::trim(input.name),
            tax_id,
            filters::email(input.email),
            filters::trim_optional(input.phone),
            filters::trim_optional(input.address),
            filters::trim_optional(input.contact_name),
            department_id,
            city_id,
            true,
        ))
    }

    async fn apply_update(
        state: &AppState,
        mut client: Self,
        input: UpdateClientDto,
    ) -> Result<Self, AppError> {
        if let Some(tax_id) = input.tax_id {
            let tax_id = filters::trim(tax_id);
            ensure_unique(
                state.clients.as_ref(),
                "taxId",
                &tax_id,
                Some(client.id),
                |c: &Client| &c.tax_id,
            )
            .await?;
            client.tax_id = tax_id;
        }

        let department = optional_id("departmentId", input.department_id.as_deref())?;
        let city = optional_id("cityId", input.city_id.as_deref())?;
        if department.is_some() || city.is_some() {
            // A new department without a city drops a city from another department
            let city = city.or_else(|| {
                client.city_id.filter(|current| {
                    department.is_none_or(|d| {
                        state
                            .locations
                            .city(*current)
                            .is_some_and(|c| c.department_id == d)
                    })
                })
            });
            let (department_id, city_id) =
                resolve_location(&state.locations, department.or(client.department_id), city)?;
            client.department_id = department_id;
            client.city_id = city_id;
        }

        if let Some(name) = input.name {
            client.name = filters::trim(name);
        }
        if let Some(email) = input.email {
            client.email = filters::email(Some(email));
        }
        if let Some(phone) = input.phone {
            client.phone = filters::trim_optional(Some(phone));
        }
        if let Some(address) = input.address {
            client.address = filters::trim_optional(Some(address));
        }
        if let Some(contact_name) = input.contact_name {
            client.contact_name = filters::trim_optional(Some(contact_name));
        }
        if let Some(is_active) = input.is_active {
            client.is_active = is_active;
        }
        Ok(client)
    }

    async fn check_delete(state: &AppState, client: &Self) -> Result<(), AppError> {
        let open = children(state.orders.as_ref(), "clientId", client.id)
            .await?
            .into_iter()
            .filter(|order| !order.status.is_terminal())
            .count();

        if open > 0 {
            return Err(EntityError::invalid_state(
                "client",
                format!("El cliente tiene {open} pedido(s) abierto(s) y no puede eliminarse"),
            )
            .into());
        }
        Ok(())
    }
}
