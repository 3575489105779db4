use crate::impl_record;

impl_record!(
    /// Top-level expense classification (transport, materials, ...)
    ExpenseType,
    "expense_type",
    "expense-types",
    {
        name: String,
        description: Option<String>,
        is_active: bool,
    }
);
