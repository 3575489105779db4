use crate::impl_record;

impl_record!(
    /// Organizational area; job positions (cargos) belong to one area
    Area,
    "area",
    "areas",
    {
        name: String,
        description: Option<String>,
        is_active: bool,
    }
);
