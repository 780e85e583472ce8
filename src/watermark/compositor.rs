//! Watermark compositor for blending watermarks onto images.
//!
//! Two blend modes are used:
//!
//! - [`alpha_composite`]: Porter-Duff "over" with straight alpha, for the
//!   full-size text overlay.
//! - [`paste_with_mask`]: every channel, alpha included, is interpolated
//!   between base and watermark using the watermark's alpha as the mask.
//!   Used for image watermarks.
//!
//! Both clip to the target; watermark pixels outside it are dropped.

use super::position::PlacementPosition;
use image::{Rgba, RgbaImage};

/// Composite `overlay` over `base` and return the result.
///
/// The overlay is placed at the origin. If the sizes differ only the
/// overlapping region is blended.
pub fn alpha_composite(base: &RgbaImage, overlay: &RgbaImage) -> RgbaImage {
    let mut out = base.clone();
    let width = base.width().min(overlay.width());
    let height = base.height().min(overlay.height());

    for y in 0..height {
        for x in 0..width {
            let fg = *overlay.get_pixel(x, y);
            if fg[3] == 0 {
                continue;
            }
            let bg = *out.get_pixel(x, y);
            out.put_pixel(x, y, blend_over(bg, fg));
        }
    }

    out
}

/// Blend two pixels with the "over" operator.
///
/// result.a = fg.a + bg.a * (1 - fg.a); each color channel is the
/// alpha-weighted mix divided back by result.a.
fn blend_over(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let result =
            (fg as f32 * fg_alpha + bg as f32 * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        result.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

/// Paste `watermark` into `target` at `position`, masked by its own alpha.
///
/// A mask value of 0 leaves the target pixel untouched and 255 replaces it
/// outright. Positions may be negative or past the edges.
pub fn paste_with_mask(target: &mut RgbaImage, watermark: &RgbaImage, position: PlacementPosition) {
    let target_width = target.width() as i32;
    let target_height = target.height() as i32;

    let wm_width = watermark.width() as i32;
    let wm_height = watermark.height() as i32;

    // Visible region, clamped to target bounds
    let x_start = position.x.max(0);
    let y_start = position.y.max(0);
    let x_end = (position.x.saturating_add(wm_width)).min(target_width);
    let y_end = (position.y.saturating_add(wm_height)).min(target_height);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let wx = (tx - position.x) as u32;
            let wy = (ty - position.y) as u32;

            let wm_pixel = *watermark.get_pixel(wx, wy);
            let mask = wm_pixel[3];
            if mask == 0 {
                continue;
            }

            let pixel = target.get_pixel_mut(tx as u32, ty as u32);
            for c in 0..4 {
                pixel[c] = mask_blend(wm_pixel[c], pixel[c], mask);
            }
        }
    }
}

/// `(src * mask + dst * (255 - mask)) / 255`, rounded.
fn mask_blend(src: u8, dst: u8, mask: u8) -> u8 {
    let tmp = src as u32 * mask as u32 + dst as u32 * (255 - mask as u32) + 128;
    ((tmp + (tmp >> 8)) >> 8) as u8
}
