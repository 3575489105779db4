use crate::impl_record;
use uuid::Uuid;

impl_record!(
    /// Job position inside an area
    Cargo,
    "cargo",
    "cargos",
    {
        name: String,
        description: Option<String>,
        area_id: Uuid,
        is_active: bool,
    }
);
