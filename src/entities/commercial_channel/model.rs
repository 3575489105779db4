use crate::impl_record;

impl_record!(
    /// Sales channel an order comes through (retail, distributor, online, ...)
    CommercialChannel,
    "commercial_channel",
    "commercial-channels",
    {
        name: String,
        description: Option<String>,
        is_active: bool,
    }
);
