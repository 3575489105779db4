//! Shared state handed to every handler

use crate::config::{AppConfig, UploadConfig};
use crate::core::{DataService, JwtKeys, NumberSequence};
use crate::entities::area::Area;
use crate::entities::cargo::Cargo;
use crate::entities::client::Client;
use crate::entities::commercial_channel::CommercialChannel;
use crate::entities::expense_order::ExpenseOrder;
use crate::entities::expense_subcategory::ExpenseSubcategory;
use crate::entities::expense_type::ExpenseType;
use crate::entities::file::File;
use crate::entities::location::LocationCatalog;
use crate::entities::order::Order;
use crate::entities::order_edit_request::OrderEditRequest;
use crate::entities::order_status_change::OrderStatusChangeRequest;
use crate::entities::work_order::WorkOrder;
use crate::storage::{Backend, InMemoryObjectStorage, ObjectStorage};
use std::sync::Arc;

const NUMBER_WIDTH: usize = 6;

/// Document number generators (`PED`, `OT`, `OG`)
#[derive(Debug)]
pub struct Sequences {
    pub orders: NumberSequence,
    pub work_orders: NumberSequence,
    pub expense_orders: NumberSequence,
}

impl Default for Sequences {
    fn default() -> Self {
        Self {
            orders: NumberSequence::new("PED", NUMBER_WIDTH),
            work_orders: NumberSequence::new("OT", NUMBER_WIDTH),
            expense_orders: NumberSequence::new("OG", NUMBER_WIDTH),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub areas: Arc<dyn DataService<Area>>,
    pub cargos: Arc<dyn DataService<Cargo>>,
    pub commercial_channels: Arc<dyn DataService<CommercialChannel>>,
    pub expense_types: Arc<dyn DataService<ExpenseType>>,
    pub expense_subcategories: Arc<dyn DataService<ExpenseSubcategory>>,
    pub clients: Arc<dyn DataService<Client>>,
    pub orders: Arc<dyn DataService<Order>>,
    pub order_edit_requests: Arc<dyn DataService<OrderEditRequest>>,
    pub order_status_changes: Arc<dyn DataService<OrderStatusChangeRequest>>,
    pub work_orders: Arc<dyn DataService<WorkOrder>>,
    pub expense_orders: Arc<dyn DataService<ExpenseOrder>>,
    pub files: Arc<dyn DataService<File>>,
    pub locations: Arc<LocationCatalog>,
    pub objects: Arc<dyn ObjectStorage>,
    pub sequences: Arc<Sequences>,
    pub upload: UploadConfig,
    pub jwt: Arc<JwtKeys>,
}

impl AppState {
    pub fn new(backend: &Backend, objects: Arc<dyn ObjectStorage>, config: &AppConfig) -> Self {
        Self {
            areas: backend.service(),
            cargos: backend.service(),
            commercial_channels: backend.service(),
            expense_types: backend.service(),
            expense_subcategories: backend.service(),
            clients: backend.service(),
            orders: backend.service(),
            order_edit_requests: backend.service(),
            order_status_changes: backend.service(),
            work_orders: backend.service(),
            expense_orders: backend.service(),
            files: backend.service(),
            locations: Arc::new(LocationCatalog::colombia()),
            objects,
            sequences: Arc::new(Sequences::default()),
            upload: config.upload.clone(),
            jwt: Arc::new(JwtKeys::new(&config.jwt)),
        }
    }

    /// Everything in process memory
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::new(
            &Backend::InMemory,
            Arc::new(InMemoryObjectStorage::new()),
            config,
        )
    }
}
