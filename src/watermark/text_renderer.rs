//! Text watermark rendering.
//!
//! Text is drawn onto a fully transparent overlay the size of the base
//! image, then composited over the base. Drawing into a separate layer keeps
//! anti-aliased glyph edges blending against the base's real colors.
//!
//! # Example
//!
//! ```
//! use imprint::watermark::font::WatermarkFont;
//! use imprint::watermark::position::PlacementPosition;
//! use imprint::watermark::text_renderer::{parse_color, render_text_overlay};
//!
//! let font = WatermarkFont::builtin(16.0);
//! let color = parse_color("#FFFFFF");
//! let overlay = render_text_overlay(200, 100, "HI", &font, PlacementPosition::new(10, 10), color, 255);
//! assert_eq!(overlay.dimensions(), (200, 100));
//! ```

use super::font::WatermarkFont;
use super::position::PlacementPosition;
use image::{Rgba, RgbaImage};

/// RGB text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White color.
    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Black color.
    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn with_alpha(&self, alpha: u8) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, alpha])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}

/// Parse a color given as `#RRGGBB` or `r,g,b`.
///
/// Decimal components are clamped to 0-255. Anything else, including the
/// short `#RGB` form, yields white.
///
/// # Examples
///
/// ```
/// use imprint::watermark::text_renderer::{parse_color, Color};
///
/// assert_eq!(parse_color("#FF0000"), Color::new(255, 0, 0));
/// assert_eq!(parse_color("0,128,255"), Color::new(0, 128, 255));
/// assert_eq!(parse_color("not-a-color"), Color::white());
/// ```
pub fn parse_color(spec: &str) -> Color {
    let spec = spec.trim();

    let parsed = match spec.strip_prefix('#') {
        Some(hex) => parse_hex(hex),
        None => parse_components(spec),
    };

    parsed.unwrap_or_else(Color::white)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::new(r, g, b))
}

fn parse_components(spec: &str) -> Option<Color> {
    let parts = spec
        .split(',')
        .map(|part| part.trim().parse::<i64>().ok())
        .collect::<Option<Vec<_>>>()?;

    match parts.as_slice() {
        [r, g, b] => Some(Color::new(channel(*r), channel(*g), channel(*b))),
        _ => None,
    }
}

fn channel(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

/// Draw `text` onto a transparent `width` x `height` overlay.
///
/// Glyph coverage scales `opacity` to give each pixel's alpha; where glyphs
/// overlap the stronger coverage wins.
pub fn render_text_overlay(
    width: u32,
    height: u32,
    text: &str,
    font: &WatermarkFont,
    position: PlacementPosition,
    color: Color,
    opacity: u8,
) -> RgbaImage {
    let mut overlay = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));

    font.rasterize(text, position.x, position.y, |x, y, coverage| {
        if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
            return;
        }

        let alpha = (coverage.clamp(0.0, 1.0) * opacity as f32).round() as u8;
        if alpha == 0 {
            return;
        }

        let pixel = overlay.get_pixel_mut(x as u32, y as u32);
        if alpha > pixel[3] {
            *pixel = color.with_alpha(alpha);
        }
    });

    overlay
}
