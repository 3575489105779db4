//! Client entity module

pub mod dto;
pub mod handlers;
pub mod model;

pub use dto::{CreateClientDto, UpdateClientDto};
pub use model::Client;
