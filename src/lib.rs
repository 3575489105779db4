//! # gestor
//!
//! Business-management REST service: catalogs, clients, orders, work orders,
//! expense orders and uploaded documents.
//!
//! ## Features
//!
//! - **Modules**: each business area registers its records and custom routes
//! - **Generic CRUD**: list/get/create/update/soft-delete from one trait impl
//! - **Status machines**: orders, work orders, expense orders and edit requests
//! - **Pluggable storage**: in-memory by default, PostgreSQL and S3 behind features
//! - **JWT auth**: HS256 bearer tokens with role checks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gestor::prelude::*;
//!
//! let config = AppConfig::from_env()?;
//! let state = AppState::in_memory(&config);
//! let app = gestor::app(state, &config)?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod modules;
pub mod server;
pub mod storage;
pub mod telemetry;

use crate::modules::{CatalogModule, CommercialModule, DocumentsModule, OperationsModule};
use crate::server::{AppState, ServerBuilder};

/// Builder with every business module registered
pub fn server_builder() -> ServerBuilder {
    ServerBuilder::new()
        .register_module(CatalogModule)
        .register_module(CommercialModule)
        .register_module(OperationsModule)
        .register_module(DocumentsModule)
}

/// The complete application router
pub fn app(state: AppState, config: &config::AppConfig) -> anyhow::Result<axum::Router> {
    server_builder().build(state, config)
}

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        AppError, AuthContext, AuthPolicy, DataService, EditRequestStatus, Entity,
        ExpenseOrderStatus, JwtKeys, Module, OrderStatus, StatusFlow, WorkOrderStatus,
    };

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{
        AppState, CrudDescriptor, CrudResource, EntityDescriptor, EntityRegistry, ServerBuilder,
    };

    // === Storage ===
    pub use crate::storage::{Backend, InMemoryDataService, InMemoryObjectStorage, ObjectStorage};

    // === Macros ===
    pub use crate::impl_record;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
