//! `data:` URL encoding for persisted model payloads
//!
//! The persisted form of a model is a self-contained base64 data URL, the
//! same representation a browser `FileReader.readAsDataURL` produces.

use crate::error::AerosuiteError;
use base64::Engine;

/// Encode bytes as `data:<mime>;base64,<payload>`
///
/// # Examples
///
/// ```
/// use aerosuite::model::data_url;
///
/// let url = data_url::encode("model/obj", b"v 0 0 0");
/// assert!(url.starts_with("data:model/obj;base64,"));
/// ```
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Decode a base64 `data:` URL into its MIME type and payload
///
/// # Errors
///
/// Returns `AerosuiteError::InvalidDataUrl` when the scheme, encoding
/// marker, or base64 payload is malformed.
pub fn decode(data_url: &str) -> Result<(String, Vec<u8>), AerosuiteError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| AerosuiteError::InvalidDataUrl("missing data: scheme".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AerosuiteError::InvalidDataUrl("missing payload separator".to_string()))?;

    let mime = header.strip_suffix(";base64").ok_or_else(|| {
        AerosuiteError::InvalidDataUrl("only base64-encoded data URLs are supported".to_string())
    })?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| AerosuiteError::InvalidDataUrl(format!("bad base64 payload: {}", e)))?;

    let mime = if mime.is_empty() {
        "application/octet-stream".to_string()
    } else {
        mime.to_string()
    };

    Ok((mime, bytes))
}
