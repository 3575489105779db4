//! Expense subcategory entity module

pub mod dto;
pub mod handlers;
pub mod model;

pub use dto::{CreateExpenseSubcategoryDto, UpdateExpenseSubcategoryDto};
pub use model::ExpenseSubcategory;
