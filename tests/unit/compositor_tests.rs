// Compositing and scaling tests

use image::{Rgba, RgbaImage};
use imprint::watermark::{
    alpha_composite, apply_opacity, paste_with_mask, scale_watermark, scaled_dimensions,
    PlacementPosition,
};
use rstest::rstest;

#[rstest]
#[case(512, 512, 64)]
#[case(1000, 10, 64)]
#[case(10, 1000, 64)]
#[case(333, 777, 100)]
#[case(4096, 3, 1)]
#[case(50, 40, 128)]
fn test_scaled_dimensions_bounds(#[case] width: u32, #[case] height: u32, #[case] max: u32) {
    let (w, h) = scaled_dimensions(width, height, max);

    assert!(w >= 1 && h >= 1, "never zero");
    assert!(w <= width && h <= height, "never upscales");
    assert!(w <= max && h <= max, "{}x{} exceeds {}", w, h, max);
}

#[test]
fn test_scale_watermark_512_to_64() {
    let source = RgbaImage::from_pixel(512, 512, Rgba([255, 255, 255, 255]));
    let scaled = scale_watermark(source, 64).unwrap();
    assert_eq!(scaled.dimensions(), (64, 64));
}

#[test]
fn test_opacity_halves_alpha() {
    let mut image = RgbaImage::from_fn(3, 1, |x, _| Rgba([255, 255, 255, [255, 200, 64][x as usize]]));

    apply_opacity(&mut image, 128);

    let alphas: Vec<u8> = image.pixels().map(|p| p[3]).collect();
    // 255 * 128 / 255 = 128, 200 * 128 / 255 = 100, 64 * 128 / 255 = 32
    assert_eq!(alphas, vec![128, 100, 32]);
}

#[test]
fn test_zero_opacity_paste_leaves_base_identical() {
    let base = RgbaImage::from_fn(32, 32, |x, y| Rgba([x as u8 * 7, y as u8 * 5, 90, 255]));
    let mut watermark = RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 255]));
    apply_opacity(&mut watermark, 0);

    let mut out = base.clone();
    paste_with_mask(&mut out, &watermark, PlacementPosition::new(8, 8));

    assert_eq!(out, base);
}

#[test]
fn test_full_opacity_paste_replaces_masked_pixels() {
    let base = RgbaImage::from_pixel(32, 32, Rgba([0, 0, 0, 255]));
    let watermark = RgbaImage::from_pixel(16, 16, Rgba([12, 34, 56, 255]));

    let mut out = base.clone();
    paste_with_mask(&mut out, &watermark, PlacementPosition::new(8, 8));

    for (x, y, pixel) in out.enumerate_pixels() {
        if (8..24).contains(&x) && (8..24).contains(&y) {
            assert_eq!(*pixel, Rgba([12, 34, 56, 255]));
        } else {
            assert_eq!(*pixel, Rgba([0, 0, 0, 255]));
        }
    }
}

#[test]
fn test_composite_keeps_transparent_base_regions_transparent() {
    let base = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
    let mut overlay = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
    overlay.put_pixel(1, 1, Rgba([255, 255, 255, 255]));

    let out = alpha_composite(&base, &overlay);

    assert_eq!(*out.get_pixel(1, 1), Rgba([255, 255, 255, 255]));
    assert_eq!(*out.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
}
