//! Order edit requests

pub mod dto;
pub mod handlers;
pub mod model;

pub use dto::{CreateOrderEditRequestDto, ReviewOrderEditRequestDto};
pub use handlers::{
    create_edit_request, get_edit_request, list_edit_requests, list_order_edit_requests,
    review_edit_request,
};
pub use model::OrderEditRequest;
