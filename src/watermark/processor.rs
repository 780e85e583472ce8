//! Watermark processor for applying watermarks to images.
//!
//! [`apply_watermark`] is the single dispatch point between text and image
//! watermarks. Neither path can fail from the caller's point of view: every
//! resource problem is an explicit branch that logs and falls back to the
//! built-in font or to the unmodified base image.
//!
//! # Example
//!
//! ```no_run
//! use imprint::config::WatermarkSettings;
//! use imprint::watermark::processor::watermark;
//!
//! let base = image::open("render.png").unwrap();
//! let settings = WatermarkSettings::default();
//! let watermarked = watermark(&base, &settings);
//! ```

use super::compositor::{alpha_composite, paste_with_mask};
use super::font::load_font;
use super::position::{is_visible, resolve_position, ImageDimensions, WatermarkDimensions};
use super::spec::{ImageWatermark, PlacementSpec, TextWatermark, WatermarkSpec};
use super::text_renderer::render_text_overlay;
use super::WatermarkError;
use crate::config::WatermarkSettings;
use fast_image_resize::{FilterType, Image, MulDiv, PixelType, ResizeAlg, Resizer};
use image::io::Reader as ImageReader;
use image::{DynamicImage, RgbaImage};
use std::num::NonZeroU32;
use std::path::Path;

/// Watermark `image` as described by `settings`.
///
/// Always returns an 8-bit RGBA image, converting deeper sources down. When
/// watermarking is impossible the result carries the base image's pixels
/// unchanged.
pub fn watermark(image: &DynamicImage, settings: &WatermarkSettings) -> DynamicImage {
    let (spec, placement) = settings.to_spec();
    DynamicImage::ImageRgba8(apply_watermark(image, &spec, &placement))
}

/// Apply one watermark to a copy of `base`.
pub fn apply_watermark(
    base: &DynamicImage,
    spec: &WatermarkSpec,
    placement: &PlacementSpec,
) -> RgbaImage {
    let base = base.to_rgba8();

    tracing::debug!(
        kind = spec.kind(),
        opacity = spec.opacity(),
        anchor = %placement.anchor,
        "Applying watermark"
    );

    match spec {
        WatermarkSpec::Text(text) => render_text_watermark(&base, text, placement),
        WatermarkSpec::Image(image) => render_image_watermark(&base, image, placement),
    }
}

/// Render a text watermark onto a transparent overlay and composite it.
pub fn render_text_watermark(
    base: &RgbaImage,
    spec: &TextWatermark,
    placement: &PlacementSpec,
) -> RgbaImage {
    if spec.text.is_empty() {
        return base.clone();
    }

    let font = load_font(&spec.font_path(), spec.font_size_px as f32);
    let (text_w, text_h) = font.measure(&spec.text);

    let image_dims = ImageDimensions {
        width: base.width(),
        height: base.height(),
    };
    let text_dims = WatermarkDimensions {
        width: text_w,
        height: text_h,
    };
    let position = resolve_position(&image_dims, &text_dims, placement);

    if !is_visible(&position, &image_dims, &text_dims) {
        tracing::debug!(x = position.x, y = position.y, "Text watermark lies outside the image");
        return base.clone();
    }

    tracing::debug!(
        text_width = text_w,
        text_height = text_h,
        x = position.x,
        y = position.y,
        builtin_font = font.is_builtin(),
        "Rendering text watermark"
    );

    let overlay = render_text_overlay(
        base.width(),
        base.height(),
        &spec.text,
        &font,
        position,
        spec.color,
        spec.opacity,
    );

    alpha_composite(base, &overlay)
}

/// Scale, fade and paste an image watermark onto a copy of `base`.
pub fn render_image_watermark(
    base: &RgbaImage,
    spec: &ImageWatermark,
    placement: &PlacementSpec,
) -> RgbaImage {
    let watermark = match prepare_image_watermark(spec) {
        Ok(watermark) => watermark,
        Err(e) => {
            tracing::warn!(
                source = %spec.source_path.display(),
                error = %e,
                "Skipping image watermark"
            );
            return base.clone();
        }
    };

    let image_dims = ImageDimensions {
        width: base.width(),
        height: base.height(),
    };
    let wm_dims = WatermarkDimensions {
        width: watermark.width(),
        height: watermark.height(),
    };
    let position = resolve_position(&image_dims, &wm_dims, placement);

    if !is_visible(&position, &image_dims, &wm_dims) {
        tracing::debug!(x = position.x, y = position.y, "Image watermark lies outside the image");
        return base.clone();
    }

    tracing::debug!(
        width = wm_dims.width,
        height = wm_dims.height,
        x = position.x,
        y = position.y,
        "Pasting image watermark"
    );

    let mut out = base.clone();
    paste_with_mask(&mut out, &watermark, position);
    out
}

/// Load, scale and fade the watermark image.
fn prepare_image_watermark(spec: &ImageWatermark) -> Result<RgbaImage, WatermarkError> {
    let source = load_watermark_image(&spec.source_path)?;
    let mut scaled = scale_watermark(source, spec.max_dimension_px)?;
    apply_opacity(&mut scaled, spec.opacity);
    Ok(scaled)
}

/// Decode the watermark image at `path` into RGBA.
pub fn load_watermark_image(path: &Path) -> Result<RgbaImage, WatermarkError> {
    if !path.is_file() {
        return Err(WatermarkError::SourceMissing(path.display().to_string()));
    }

    let image = ImageReader::open(path)
        .map_err(|e| WatermarkError::DecodeError(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| WatermarkError::DecodeError(e.to_string()))?
        .decode()
        .map_err(|e| WatermarkError::DecodeError(e.to_string()))?;

    if image.width() == 0 || image.height() == 0 {
        return Err(WatermarkError::EmptySource {
            width: image.width(),
            height: image.height(),
        });
    }

    Ok(image.to_rgba8())
}

/// Size of a `width` x `height` watermark fitted inside `max_dim` x `max_dim`.
///
/// Aspect ratio is kept, the result is never larger than the source and
/// never smaller than 1x1.
pub fn scaled_dimensions(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width.max(1), height.max(1));
    }

    let max_dim = max_dim.max(1) as f64;
    let ratio = (max_dim / width as f64)
        .min(max_dim / height as f64)
        .min(1.0);

    let scaled = |dim: u32| ((dim as f64 * ratio).floor() as u32).max(1);
    (scaled(width), scaled(height))
}

/// Downscale with Lanczos3 so the longer side fits `max_dim`.
///
/// Color is premultiplied by alpha while resampling so transparent pixels
/// don't bleed their color into visible edges.
pub fn scale_watermark(image: RgbaImage, max_dim: u32) -> Result<RgbaImage, WatermarkError> {
    let (src_w, src_h) = image.dimensions();
    let (target_w, target_h) = scaled_dimensions(src_w, src_h, max_dim);

    if (target_w, target_h) == (src_w, src_h) {
        return Ok(image);
    }

    let src_width = NonZeroU32::new(src_w)
        .ok_or_else(|| WatermarkError::ResizeError("Source width is 0".to_string()))?;
    let src_height = NonZeroU32::new(src_h)
        .ok_or_else(|| WatermarkError::ResizeError("Source height is 0".to_string()))?;
    let dst_width = NonZeroU32::new(target_w)
        .ok_or_else(|| WatermarkError::ResizeError("Target width is 0".to_string()))?;
    let dst_height = NonZeroU32::new(target_h)
        .ok_or_else(|| WatermarkError::ResizeError("Target height is 0".to_string()))?;

    let mut src_image = Image::from_vec_u8(src_width, src_height, image.into_raw(), PixelType::U8x4)
        .map_err(|e| {
            WatermarkError::ResizeError(format!("Failed to create source image: {:?}", e))
        })?;

    let mul_div = MulDiv::default();
    mul_div
        .multiply_alpha_inplace(&mut src_image.view_mut())
        .map_err(|e| WatermarkError::ResizeError(format!("Premultiply failed: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);
    {
        let mut dst_view = dst_image.view_mut();
        let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));

        resizer
            .resize(&src_image.view(), &mut dst_view)
            .map_err(|e| WatermarkError::ResizeError(format!("Resize operation failed: {:?}", e)))?;

        mul_div
            .divide_alpha_inplace(&mut dst_view)
            .map_err(|e| WatermarkError::ResizeError(format!("Unpremultiply failed: {:?}", e)))?;
    }

    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| WatermarkError::ResizeError("Failed to create output image buffer".to_string()))
}

/// Multiply every pixel's alpha by `opacity / 255`, truncating.
pub fn apply_opacity(image: &mut RgbaImage, opacity: u8) {
    if opacity == 255 {
        return;
    }
    for pixel in image.pixels_mut() {
        pixel[3] = (pixel[3] as u32 * opacity as u32 / 255) as u8;
    }
}
