use crate::impl_record;
use uuid::Uuid;

impl_record!(
    /// Refinement of an expense type (e.g. transport -> fuel)
    ExpenseSubcategory,
    "expense_subcategory",
    "expense-subcategories",
    {
        name: String,
        description: Option<String>,
        expense_type_id: Uuid,
        is_active: bool,
    }
);
