// Helpers for writing test images to disk

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imprint::config::WatermarkSettings;
use std::path::{Path, PathBuf};

pub const BASE_COLOR: Rgba<u8> = Rgba([20, 40, 60, 255]);

/// Write a solid-colored image in the given format.
pub fn write_image(dir: &Path, name: &str, format: ImageFormat, color: Rgba<u8>) -> PathBuf {
    let path = dir.join(name);
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(200, 100, color));
    let image = match format {
        ImageFormat::Jpeg | ImageFormat::Bmp => DynamicImage::ImageRgb8(image.to_rgb8()),
        _ => image,
    };
    image.save_with_format(&path, format).unwrap();
    path
}

/// Write bytes that carry an image extension but don't decode.
pub fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"\x89PNG\r\n\x1a\nthis is not image data").unwrap();
    path
}

/// Text settings that always use the built-in font.
pub fn text_settings(text: &str) -> WatermarkSettings {
    WatermarkSettings {
        text: text.to_string(),
        font_dir: PathBuf::from("no-fonts-here"),
        font_size_px: 16,
        opacity: 255,
        ..Default::default()
    }
}
