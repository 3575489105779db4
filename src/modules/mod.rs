//! Business modules registered with the server

pub mod catalog;
pub mod commercial;
pub mod documents;
pub mod operations;

pub use catalog::CatalogModule;
pub use commercial::CommercialModule;
pub use documents::DocumentsModule;
pub use operations::OperationsModule;
