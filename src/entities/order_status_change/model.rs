use crate::core::OrderStatus;
use crate::impl_record;
use uuid::Uuid;

impl_record!(
    /// Audit entry written for every order status change
    OrderStatusChangeRequest,
    "order_status_change",
    "order-status-changes",
    {
        order_id: Uuid,
        from_status: OrderStatus,
        to_status: OrderStatus,
        reason: Option<String>,
        requested_by: Option<String>,
    }
);
