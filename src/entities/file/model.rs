use crate::impl_record;

impl_record!(
    /// Metadata of an uploaded document; the bytes live in object storage
    File,
    "file",
    "files",
    {
        original_name: String,
        key: String,
        url: String,
        mime_type: String,
        size: u64,
        folder: String,
        uploaded_by: Option<String>,
    }
);
