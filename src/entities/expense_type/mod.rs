//! Expense type entity module

pub mod dto;
pub mod handlers;
pub mod model;

pub use dto::{CreateExpenseTypeDto, UpdateExpenseTypeDto};
pub use handlers::list_subcategories;
pub use model::ExpenseType;
