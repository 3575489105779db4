//! Naming and content-type rules for uploads

use uuid::Uuid;

/// Folder used when the upload does not name one
pub const DEFAULT_FOLDER: &str = "general";

/// Accepted content types and the extensions they are recognized by
pub const ALLOWED_TYPES: &[(&str, &[&str])] = &[
    ("application/pdf", &["pdf"]),
    ("image/jpeg", &["jpg", "jpeg"]),
    ("image/png", &["png"]),
    ("image/webp", &["webp"]),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        &["xlsx"],
    ),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        &["docx"],
    ),
    ("text/csv", &["csv"]),
    ("text/plain", &["txt"]),
];

const MAX_NAME_LEN: usize = 100;

/// Resolve the content type of an upload against the allowlist
///
/// Parameters such as `charset` are dropped. A missing or generic
/// (`application/octet-stream`) type falls back to the file extension.
/// Returns the rejected type on failure.
pub fn resolve_mime(declared: Option<&str>, file_name: &str) -> Result<&'static str, String> {
    let declared = declared
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty());

    match declared.as_deref() {
        None | Some("application/octet-stream") => {
            let extension = file_name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
                .unwrap_or_default();
            ALLOWED_TYPES
                .iter()
                .find(|(_, extensions)| extensions.contains(&extension.as_str()))
                .map(|(mime, _)| *mime)
                .ok_or_else(|| {
                    declared
                        .clone()
                        .unwrap_or_else(|| "application/octet-stream".to_string())
                })
        }
        Some(mime) => ALLOWED_TYPES
            .iter()
            .map(|(allowed, _)| *allowed)
            .find(|allowed| *allowed == mime)
            .ok_or_else(|| mime.to_string()),
    }
}

/// Reduce a client-supplied file name to `[A-Za-z0-9._-]`
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let mut out = String::with_capacity(base.len());
    for ch in base.chars() {
        let ch = if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
            ch
        } else {
            '_'
        };
        if !(ch == '_' && out.ends_with('_')) {
            out.push(ch);
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        return "file".to_string();
    }
    let start = trimmed.len().saturating_sub(MAX_NAME_LEN);
    trimmed[start..].to_string()
}

/// Storage key `{folder}/{uuid}-{sanitized name}`
pub fn object_key(folder: &str, file_name: &str) -> String {
    format!(
        "{}/{}-{}",
        folder.trim_end_matches('/'),
        Uuid::new_v4(),
        sanitize_file_name(file_name)
    )
}

/// `Content-Disposition` value for a download
pub fn content_disposition(file_name: &str) -> String {
    format!("attachment; filename=\"{}\"", sanitize_file_name(file_name))
}
