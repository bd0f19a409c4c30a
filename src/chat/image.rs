//! Image attachment loading for the copilot chat
//!
//! Only real image files are accepted: the extension must name an image
//! type and the bytes must decode with the `image` crate.

use crate::error::{AerosuiteError, Result};
use crate::providers::ImageAttachment;
use anyhow::Context;
use base64::Engine;
use image::GenericImageView;
use std::path::Path;

/// Dimensions and type of a loaded attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected format
    pub format: image::ImageFormat,
}

/// Returns true if the file extension names a supported image type
///
/// # Examples
///
/// ```
/// use aerosuite::chat::image::is_image_file;
/// use std::path::Path;
///
/// assert!(is_image_file(Path::new("sketch.PNG")));
/// assert!(!is_image_file(Path::new("body.glb")));
/// ```
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            matches!(
                ext.to_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "webp" | "gif" | "bmp"
            )
        })
        .unwrap_or(false)
}

/// Validate image bytes and wrap them as an inline attachment
///
/// # Errors
///
/// Returns `AerosuiteError::UnsupportedImage` if the bytes do not decode.
pub fn attachment_from_bytes(bytes: &[u8]) -> Result<(ImageAttachment, ImageInfo)> {
    let format = image::guess_format(bytes)
        .map_err(|e| AerosuiteError::UnsupportedImage(format!("unknown image type: {}", e)))?;
    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| AerosuiteError::UnsupportedImage(format!("decoding failed: {}", e)))?;
    let (width, height) = decoded.dimensions();

    let attachment = ImageAttachment {
        mime_type: format.to_mime_type().to_string(),
        data: base64::engine::general_purpose::STANDARD.encode(bytes),
    };
    Ok((
        attachment,
        ImageInfo {
            width,
            height,
            format,
        },
    ))
}

/// Read an image file into an inline attachment
///
/// # Errors
///
/// Returns `AerosuiteError::UnsupportedImage` for non-image extensions or
/// undecodable content.
pub async fn load_attachment(path: &Path) -> Result<(ImageAttachment, ImageInfo)> {
    if !is_image_file(path) {
        return Err(AerosuiteError::UnsupportedImage(format!(
            "{} is not an image file",
            path.display()
        ))
        .into());
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    attachment_from_bytes(&bytes)
}
