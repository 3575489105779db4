use crate::core::ExpenseOrderStatus;
use crate::impl_record;
use chrono::{DateTime, Utc};
use uuid::Uuid;

impl_record!(
    /// Expense charged to a work order, numbered `OG-000001`, ...
    ExpenseOrder,
    "expense_order",
    "expense-orders",
    {
        number: String,
        work_order_id: Uuid,
        expense_type_id: Uuid,
        expense_subcategory_id: Option<Uuid>,
        amount: f64,
        description: String,
        beneficiary: Option<String>,
        status: ExpenseOrderStatus,
        requested_by: Option<String>,
        authorized_by: Option<String>,
        authorized_at: Option<DateTime<Utc>>,
        observation: Option<String>,
    }
);
