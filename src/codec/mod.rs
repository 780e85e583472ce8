//! Image decoding and format-preserving persistence
//!
//! A watermarked image is written back in the format it was read from.
//! PNG, WebP and TIFF keep the alpha channel; every other format is
//! flattened to RGB before encoding.
//!
//! Watermarking works on 8-bit RGBA, so 16-bit and floating point sources
//! come back at 8 bits per channel in their original container format.

pub mod encoder;
pub mod format;

pub use encoder::{EncoderFactory, ImageEncoder};
pub use format::{
    detect_format, format_from_extension, format_name, format_supports_transparency,
    has_extension,
};

use crate::error::ImprintError;
use image::io::Reader as ImageReader;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// A decoded image together with the format it was stored in.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

/// Read and decode the image at `path`.
pub fn load_image(path: &Path) -> Result<LoadedImage, ImprintError> {
    let data = std::fs::read(path)?;
    decode_image(&data, path)
}

/// Decode `data`; `path` only serves as a format hint.
pub fn decode_image(data: &[u8], path: &Path) -> Result<LoadedImage, ImprintError> {
    let format = detect_format(data, path)?;

    let image = ImageReader::with_format(Cursor::new(data), format).decode()?;

    Ok(LoadedImage { image, format })
}

/// Encode `image` as `format` and write it to `path`.
pub fn save_image(
    image: &DynamicImage,
    path: &Path,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<(), ImprintError> {
    let encoder = EncoderFactory::create(format, jpeg_quality);
    let data = encoder.encode(image)?;
    std::fs::write(path, data)?;

    tracing::debug!(
        path = %path.display(),
        format = format_name(format),
        alpha = encoder.supports_transparency(),
        "Saved image"
    );

    Ok(())
}
