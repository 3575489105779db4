//! Area entity module

pub mod dto;
pub mod handlers;
pub mod model;

pub use dto::{CreateAreaDto, UpdateAreaDto};
pub use handlers::list_area_cargos;
pub use model::Area;
