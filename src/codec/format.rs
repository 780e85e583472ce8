//! Image format detection
//!
//! The format a file is re-encoded in is the format it was decoded from.
//! Content sniffing wins over the extension, since saved files are not
//! always named after what they contain.

use crate::error::ImprintError;
use image::ImageFormat;
use std::path::Path;

/// Detect the encoded format of `data`, falling back to `path`'s extension.
pub fn detect_format(data: &[u8], path: &Path) -> Result<ImageFormat, ImprintError> {
    image::guess_format(data)
        .ok()
        .or_else(|| format_from_extension(path))
        .ok_or_else(|| ImprintError::UnsupportedFormat(path.display().to_string()))
}

/// Format implied by the file extension, if any.
pub fn format_from_extension(path: &Path) -> Option<ImageFormat> {
    ImageFormat::from_path(path).ok()
}

/// Whether `format` can store an alpha channel.
///
/// Anything that can't is flattened to RGB before encoding.
pub fn format_supports_transparency(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png | ImageFormat::WebP | ImageFormat::Tiff
    )
}

/// Case-insensitive extension check against a list of bare extensions.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            extensions
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false)
}

/// Short lowercase name for logging.
pub fn format_name(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("unknown")
}
