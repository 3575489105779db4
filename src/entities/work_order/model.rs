use crate::core::WorkOrderStatus;
use crate::impl_record;
use chrono::NaiveDate;
use uuid::Uuid;

impl_record!(
    /// Unit of work executed for an approved order, numbered `OT-000001`, ...
    WorkOrder,
    "work_order",
    "work-orders",
    {
        number: String,
        order_id: Uuid,
        cargo_id: Option<Uuid>,
        assignee: Option<String>,
        description: String,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        status: WorkOrderStatus,
        observation: Option<String>,
        created_by: Option<String>,
    }
);
