//! Records managed by the service, one module per entity

pub mod macros;

pub mod area;
pub mod cargo;
pub mod client;
pub mod commercial_channel;
pub mod expense_order;
pub mod expense_subcategory;
pub mod expense_type;
pub mod file;
pub mod location;
pub mod order;
pub mod order_edit_request;
pub mod order_status_change;
pub mod work_order;
