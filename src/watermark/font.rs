//! Font resolution for text watermarks.
//!
//! Fonts are addressed by bare name and loaded from a font directory as
//! `<name>.ttf`. When that fails (missing file, corrupt font, non-positive
//! size) text is drawn with the built-in 8x8 bitmap font, scaled up by an
//! integer factor.

use super::WatermarkError;
use crate::constants::{BUILTIN_GLYPH_SIZE, BUILTIN_REPLACEMENT_CHAR};
use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use std::path::Path;

/// A font ready to measure and rasterize text at a fixed pixel size.
pub enum WatermarkFont {
    /// A TrueType font loaded from disk.
    TrueType { font: FontVec, scale: PxScale },
    /// The built-in bitmap font, each 8x8 cell magnified by `scale`.
    Builtin { scale: u32 },
}

impl std::fmt::Debug for WatermarkFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrueType { scale, .. } => f
                .debug_struct("TrueType")
                .field("px", &scale.y)
                .finish(),
            Self::Builtin { scale } => f.debug_struct("Builtin").field("scale", scale).finish(),
        }
    }
}

/// Load `path` at `size_px`, falling back to the built-in font.
pub fn load_font(path: &Path, size_px: f32) -> WatermarkFont {
    match load_truetype(path, size_px) {
        Ok(font) => font,
        Err(e) => {
            tracing::warn!(
                font = %path.display(),
                error = %e,
                "Using built-in font"
            );
            WatermarkFont::builtin(size_px)
        }
    }
}

/// Load a TrueType font, reporting why it can't be used.
///
/// `size_px` is the em size, so a 16 px font draws its ascent-to-descent
/// span taller than 16 px for most faces.
pub fn load_truetype(path: &Path, size_px: f32) -> Result<WatermarkFont, WatermarkError> {
    if size_px.is_nan() || size_px <= 0.0 {
        return Err(WatermarkError::FontError(format!(
            "font size must be positive, got {}",
            size_px
        )));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| WatermarkError::FontError(format!("{}: {}", path.display(), e)))?;
    let font = FontVec::try_from_vec(bytes)
        .map_err(|e| WatermarkError::FontError(format!("{}: {}", path.display(), e)))?;

    let scale = em_scale(&font, size_px);
    Ok(WatermarkFont::TrueType { font, scale })
}

/// `PxScale` for an em size of `size_px`. ab_glyph scales by line height.
fn em_scale<F: Font>(font: &F, size_px: f32) -> PxScale {
    match font.units_per_em() {
        Some(units_per_em) if units_per_em > 0.0 => {
            PxScale::from(size_px * font.height_unscaled() / units_per_em)
        }
        _ => PxScale::from(size_px),
    }
}

impl WatermarkFont {
    /// Built-in font sized as close to `size_px` as whole-cell magnification
    /// allows, never smaller than one cell.
    pub fn builtin(size_px: f32) -> Self {
        let scale = if size_px.is_finite() && size_px > 0.0 {
            (size_px as u32 / BUILTIN_GLYPH_SIZE).max(1)
        } else {
            1
        };
        WatermarkFont::Builtin { scale }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, WatermarkFont::Builtin { .. })
    }

    /// Bounding box of `text` in pixels.
    ///
    /// Width sums advances and kerning. Height spans ascent to descent, so
    /// every line of the same font measures the same height regardless of
    /// which glyphs it contains.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match self {
            WatermarkFont::TrueType { font, scale } => {
                let scaled = font.as_scaled(*scale);
                let mut width = 0.0f32;
                let mut previous: Option<GlyphId> = None;

                for c in text.chars() {
                    let id = scaled.glyph_id(c);
                    if let Some(prev) = previous {
                        width += scaled.kern(prev, id);
                    }
                    width += scaled.h_advance(id);
                    previous = Some(id);
                }

                let height = scaled.ascent() - scaled.descent();
                (width.ceil().max(0.0) as u32, height.ceil().max(0.0) as u32)
            }
            WatermarkFont::Builtin { scale } => {
                let cell = BUILTIN_GLYPH_SIZE * scale;
                (text.chars().count() as u32 * cell, cell)
            }
        }
    }

    /// Rasterize `text` with its bounding box's top-left at `(x, y)`.
    ///
    /// `plot` receives absolute pixel coordinates and a coverage in 0.0-1.0.
    /// Coordinates may fall outside any target; callers clip.
    pub fn rasterize<F>(&self, text: &str, x: i32, y: i32, mut plot: F)
    where
        F: FnMut(i32, i32, f32),
    {
        match self {
            WatermarkFont::TrueType { font, scale } => {
                let scaled = font.as_scaled(*scale);
                let baseline = y as f32 + scaled.ascent();
                let mut caret = x as f32;
                let mut previous: Option<GlyphId> = None;

                for c in text.chars() {
                    let id = scaled.glyph_id(c);
                    if let Some(prev) = previous {
                        caret += scaled.kern(prev, id);
                    }
                    let glyph = id.with_scale_and_position(*scale, point(caret, baseline));
                    caret += scaled.h_advance(id);
                    previous = Some(id);

                    if let Some(outlined) = font.outline_glyph(glyph) {
                        let bounds = outlined.px_bounds();
                        outlined.draw(|gx, gy, coverage| {
                            plot(
                                bounds.min.x as i32 + gx as i32,
                                bounds.min.y as i32 + gy as i32,
                                coverage,
                            );
                        });
                    }
                }
            }
            WatermarkFont::Builtin { scale } => {
                let scale = *scale as i32;
                let cell = BUILTIN_GLYPH_SIZE as i32 * scale;

                for (index, c) in text.chars().enumerate() {
                    let rows = builtin_glyph(c);
                    let cell_x = x + index as i32 * cell;

                    for (row, bits) in rows.iter().enumerate() {
                        for col in 0..BUILTIN_GLYPH_SIZE as i32 {
                            if bits & (1 << col) == 0 {
                                continue;
                            }
                            let px = cell_x + col * scale;
                            let py = y + row as i32 * scale;
                            for dy in 0..scale {
                                for dx in 0..scale {
                                    plot(px + dx, py + dy, 1.0);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Rows of the 8x8 glyph for `c`; bit `n` of a row is column `n` from the left.
fn builtin_glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| BASIC_FONTS.get(BUILTIN_REPLACEMENT_CHAR))
        .unwrap_or([0; 8])
}
