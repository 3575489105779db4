//! Commercial channel entity module

pub mod dto;
pub mod handlers;
pub mod model;

pub use dto::{CreateCommercialChannelDto, UpdateCommercialChannelDto};
pub use model::CommercialChannel;
