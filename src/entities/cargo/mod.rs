//! Cargo (job position) entity module

pub mod dto;
pub mod handlers;
pub mod model;

pub use dto::{CreateCargoDto, UpdateCargoDto};
pub use model::Cargo;
