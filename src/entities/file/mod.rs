//! Uploaded files

pub mod handlers;
pub mod model;
pub mod upload;

pub use handlers::FileDescriptor;
pub use model::File;
