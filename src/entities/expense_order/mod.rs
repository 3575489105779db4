//! Expense order entity module

pub mod dto;
pub mod handlers;
pub mod model;

pub use dto::{CreateExpenseOrderDto, ExpenseOrderAuthRequest, UpdateExpenseOrderDto};
pub use handlers::{authorize_expense_order, list_work_order_expenses, pay_expense_order};
pub use model::ExpenseOrder;
