//! Order entity module
//!
//! Orders are freely editable while `PENDING`. Past that point changes go
//! through an [`OrderEditRequest`](crate::entities::order_edit_request::OrderEditRequest).

pub mod dto;
pub mod handlers;
pub mod model;

pub use dto::{CreateOrderDto, OrderChanges, UpdateOrderDto, UpdateOrderStatusDto};
pub use handlers::{apply_changes, status_history, update_order_status};
pub use model::Order;
