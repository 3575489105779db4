use crate::core::OrderStatus;
use crate::impl_record;
use chrono::NaiveDate;
use uuid::Uuid;

impl_record!(
    /// Customer order, numbered `PED-000001`, `PED-000002`, ...
    Order,
    "order",
    "orders",
    {
        number: String,
        client_id: Uuid,
        commercial_channel_id: Option<Uuid>,
        description: String,
        special_condition: Option<String>,
        estimated_value: Option<f64>,
        delivery_date: Option<NaiveDate>,
        status: OrderStatus,
        created_by: Option<String>,
    }
);
