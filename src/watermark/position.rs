//! Position calculation for watermark placement.
//!
//! Resolves a [`PlacementSpec`] into the top-left coordinate at which the
//! watermark's bounding box is pasted into the base image.
//!
//! # Example
//!
//! ```
//! use imprint::watermark::position::{resolve_position, ImageDimensions, WatermarkDimensions};
//! use imprint::watermark::{Anchor, PlacementSpec};
//!
//! let image = ImageDimensions { width: 800, height: 600 };
//! let watermark = WatermarkDimensions { width: 100, height: 50 };
//!
//! let pos = resolve_position(&image, &watermark, &PlacementSpec::new(Anchor::BottomRight));
//! assert_eq!((pos.x, pos.y), (690, 540)); // 800 - 100 - 10, 600 - 50 - 10
//! ```

use super::spec::{Anchor, PlacementSpec};

/// Dimensions of the target image.
#[derive(Debug, Clone, Copy)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Dimensions of the watermark to be placed.
#[derive(Debug, Clone, Copy)]
pub struct WatermarkDimensions {
    pub width: u32,
    pub height: u32,
}

/// Top-left coordinate of a placed watermark. May be negative or past the
/// image edge; the compositor clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Compute where the watermark's top-left corner goes.
///
/// Corner anchors sit `margin` pixels from both adjacent edges, `Center`
/// truncates toward zero, and `Custom` returns the custom offsets verbatim
/// without clamping. Arithmetic saturates at the `i32` range, so extreme
/// margins or dimensions land far off-canvas instead of wrapping.
pub fn resolve_position(
    image: &ImageDimensions,
    watermark: &WatermarkDimensions,
    placement: &PlacementSpec,
) -> PlacementPosition {
    let img_w = i64::from(image.width);
    let img_h = i64::from(image.height);
    let wm_w = i64::from(watermark.width);
    let wm_h = i64::from(watermark.height);
    let m = i64::from(placement.margin);

    let (x, y) = match placement.anchor {
        Anchor::TopLeft => (m, m),
        Anchor::TopRight => (img_w - wm_w - m, m),
        Anchor::BottomLeft => (m, img_h - wm_h - m),
        Anchor::BottomRight => (img_w - wm_w - m, img_h - wm_h - m),
        Anchor::Center => ((img_w - wm_w) / 2, (img_h - wm_h) / 2),
        Anchor::Custom => return PlacementPosition::new(placement.custom_x, placement.custom_y),
    };

    PlacementPosition::new(saturate(x), saturate(y))
}

/// Check if a watermark at the given position overlaps the image at all.
pub fn is_visible(
    position: &PlacementPosition,
    image: &ImageDimensions,
    watermark: &WatermarkDimensions,
) -> bool {
    let x = i64::from(position.x);
    let y = i64::from(position.y);
    let wm_right = x + i64::from(watermark.width);
    let wm_bottom = y + i64::from(watermark.height);

    wm_right > 0 && wm_bottom > 0 && x < i64::from(image.width) && y < i64::from(image.height)
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
