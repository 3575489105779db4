//! Core module containing fundamental traits and types of the service

pub mod auth;
pub mod entity;
pub mod error;
pub mod module;
pub mod query;
pub mod sequence;
pub mod service;
pub mod status;
pub mod validation;

pub use auth::{AuthContext, AuthPolicy, JwtKeys};
pub use entity::Entity;
pub use error::{AppError, EntityError, RequestError, StorageError, ValidationError};
pub use module::Module;
pub use query::{PaginatedResponse, PaginationMeta, QueryParams};
pub use sequence::NumberSequence;
pub use service::DataService;
pub use status::{EditRequestStatus, ExpenseOrderStatus, OrderStatus, StatusFlow, WorkOrderStatus};
pub use validation::ValidatedJson;
