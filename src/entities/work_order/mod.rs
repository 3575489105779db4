//! Work order entity module

pub mod dto;
pub mod handlers;
pub mod model;

pub use dto::{CreateWorkOrderDto, UpdateWorkOrderDto, UpdateWorkOrderStatusDto};
pub use handlers::{list_order_work_orders, update_work_order_status};
pub use model::WorkOrder;
