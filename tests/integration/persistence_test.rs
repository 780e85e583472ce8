// Format-preserving save tests

use super::test_images::{write_image, BASE_COLOR};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imprint::codec::{load_image, save_image};
use rstest::rstest;

#[rstest]
#[case("keep.png", ImageFormat::Png)]
#[case("keep.webp", ImageFormat::WebP)]
#[case("keep.tiff", ImageFormat::Tiff)]
fn test_alpha_formats_keep_transparency(#[case] name: &str, #[case] format: ImageFormat) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([90, 80, 70, 33])));

    save_image(&image, &path, format, 90).unwrap();
    let loaded = load_image(&path).unwrap();

    assert_eq!(loaded.format, format);
    assert!(loaded.image.color().has_alpha());
    assert_eq!(*loaded.image.to_rgba8().get_pixel(4, 4), Rgba([90, 80, 70, 33]));
}

#[rstest]
#[case("flat.jpg", ImageFormat::Jpeg)]
#[case("flat.bmp", ImageFormat::Bmp)]
fn test_opaque_formats_are_flattened(#[case] name: &str, #[case] format: ImageFormat) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([90, 80, 70, 33])));

    save_image(&image, &path, format, 90).unwrap();
    let loaded = load_image(&path).unwrap();

    assert_eq!(loaded.format, format);
    assert!(!loaded.image.color().has_alpha());
}

#[test]
fn test_format_comes_from_content_not_name() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_image(dir.path(), "src.png", ImageFormat::Png, BASE_COLOR);
    let mislabelled = dir.path().join("actually_png.jpg");
    std::fs::copy(&png, &mislabelled).unwrap();

    assert_eq!(load_image(&mislabelled).unwrap().format, ImageFormat::Png);
}
