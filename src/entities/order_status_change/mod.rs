//! Order status history

pub mod model;

pub use model::OrderStatusChangeRequest;
