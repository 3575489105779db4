use crate::core::EditRequestStatus;
use crate::entities::order::OrderChanges;
use crate::impl_record;
use chrono::{DateTime, Utc};
use uuid::Uuid;

impl_record!(
    /// Proposed change to an order that can no longer be edited directly
    OrderEditRequest,
    "order_edit_request",
    "order-edit-requests",
    {
        order_id: Uuid,
        changes: OrderChanges,
        reason: String,
        status: EditRequestStatus,
        requested_by: Option<String>,
        reviewed_by: Option<String>,
        reviewed_at: Option<DateTime<Utc>>,
        review_note: Option<String>,
    }
);
