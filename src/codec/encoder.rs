//! Format-preserving image encoders
//!
//! Each encoder takes the watermarked RGBA image and produces bytes in one
//! output format. Encoders for formats without an alpha channel flatten the
//! image to RGB first; the alpha channel is dropped, not blended.

use crate::error::ImprintError;
use image::{ColorType, DynamicImage, ImageEncoder as _, ImageFormat};
use std::io::Cursor;

/// Trait for image encoders
pub trait ImageEncoder: Send + Sync {
    /// The output format this encoder produces
    fn format(&self) -> ImageFormat;

    /// Encode `image` to bytes
    fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>, ImprintError>;

    /// Check if this encoder keeps the alpha channel
    fn supports_transparency(&self) -> bool;
}

/// JPEG encoder, always 3-channel
pub struct JpegEncoder {
    pub quality: u8,
}

impl ImageEncoder for JpegEncoder {
    fn format(&self) -> ImageFormat {
        ImageFormat::Jpeg
    }

    fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>, ImprintError> {
        use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;

        let rgb = image.to_rgb8();
        let mut output = Cursor::new(Vec::new());
        let encoder = ImageJpegEncoder::new_with_quality(&mut output, self.quality.clamp(1, 100));

        encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)?;

        Ok(output.into_inner())
    }

    fn supports_transparency(&self) -> bool {
        false
    }
}

/// PNG encoder, keeps alpha
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn format(&self) -> ImageFormat {
        ImageFormat::Png
    }

    fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>, ImprintError> {
        use image::codecs::png::PngEncoder as ImagePngEncoder;

        let rgba = image.to_rgba8();
        let mut output = Cursor::new(Vec::new());
        let encoder = ImagePngEncoder::new(&mut output);

        encoder.write_image(rgba.as_raw(), rgba.width(), rgba.height(), ColorType::Rgba8)?;

        Ok(output.into_inner())
    }

    fn supports_transparency(&self) -> bool {
        true
    }
}

/// WebP encoder, keeps alpha
///
/// The `image` crate only encodes lossless WebP.
pub struct WebPEncoder;

impl ImageEncoder for WebPEncoder {
    fn format(&self) -> ImageFormat {
        ImageFormat::WebP
    }

    fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>, ImprintError> {
        use image::codecs::webp::WebPEncoder as ImageWebPEncoder;

        let rgba = image.to_rgba8();
        let mut output = Cursor::new(Vec::new());
        let encoder = ImageWebPEncoder::new_lossless(&mut output);

        encoder.write_image(rgba.as_raw(), rgba.width(), rgba.height(), ColorType::Rgba8)?;

        Ok(output.into_inner())
    }

    fn supports_transparency(&self) -> bool {
        true
    }
}

/// Any other format the `image` crate can write (BMP, TIFF, GIF, ...)
pub struct GenericEncoder {
    pub format: ImageFormat,
}

impl ImageEncoder for GenericEncoder {
    fn format(&self) -> ImageFormat {
        self.format
    }

    fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>, ImprintError> {
        let prepared = if self.supports_transparency() {
            DynamicImage::ImageRgba8(image.to_rgba8())
        } else {
            DynamicImage::ImageRgb8(image.to_rgb8())
        };

        let mut output = Cursor::new(Vec::new());
        prepared.write_to(&mut output, self.format)?;
        Ok(output.into_inner())
    }

    fn supports_transparency(&self) -> bool {
        super::format::format_supports_transparency(self.format)
    }
}

pub struct EncoderFactory;

impl EncoderFactory {
    pub fn create(format: ImageFormat, jpeg_quality: u8) -> Box<dyn ImageEncoder> {
        match format {
            ImageFormat::Jpeg => Box::new(JpegEncoder {
                quality: jpeg_quality,
            }),
            ImageFormat::Png => Box::new(PngEncoder),
            ImageFormat::WebP => Box::new(WebPEncoder),
            other => Box::new(GenericEncoder { format: other }),
        }
    }
}
