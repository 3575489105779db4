//! Departments and cities

pub mod handlers;
pub mod model;

pub use handlers::{list_cities, list_department_cities, list_departments};
pub use model::{City, Department, LocationCatalog};
