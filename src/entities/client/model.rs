use crate::impl_record;
use uuid::Uuid;

impl_record!(
    /// Customer placing orders
    Client,
    "client",
    "clients",
    {
        name: String,
        /// NIT, unique among live clients
        tax_id: String,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        contact_name: Option<String>,
        department_id: Option<Uuid>,
        city_id: Option<Uuid>,
        is_active: bool,
    }
);
