//! Watermark and placement descriptors.
//!
//! A [`WatermarkSpec`] is built fresh for every invocation, usually from
//! [`WatermarkSettings::to_spec`](crate::config::WatermarkSettings::to_spec),
//! and consumed by [`apply_watermark`](super::processor::apply_watermark).

use super::text_renderer::Color;
use crate::constants::DEFAULT_MARGIN;
use std::fmt;
use std::path::PathBuf;

/// Named reference position for the watermark's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
    Center,
    Custom,
}

impl Anchor {
    /// Parse an anchor name leniently.
    ///
    /// Matching ignores case, surrounding whitespace, and accepts `-` in
    /// place of `_`. Anything unrecognized resolves to [`Anchor::BottomRight`].
    pub fn parse(name: &str) -> Self {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "top_left" => Anchor::TopLeft,
            "top_right" => Anchor::TopRight,
            "bottom_left" => Anchor::BottomLeft,
            "center" => Anchor::Center,
            "custom" => Anchor::Custom,
            _ => Anchor::BottomRight,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::TopLeft => "top_left",
            Anchor::TopRight => "top_right",
            Anchor::BottomLeft => "bottom_left",
            Anchor::BottomRight => "bottom_right",
            Anchor::Center => "center",
            Anchor::Custom => "custom",
        }
    }
}

impl From<&str> for Anchor {
    fn from(name: &str) -> Self {
        Anchor::parse(name)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the watermark goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementSpec {
    pub anchor: Anchor,
    /// Used only with [`Anchor::Custom`]
    pub custom_x: i32,
    /// Used only with [`Anchor::Custom`]
    pub custom_y: i32,
    /// Distance from the edges for the corner anchors
    pub margin: i32,
}

impl Default for PlacementSpec {
    fn default() -> Self {
        Self {
            anchor: Anchor::BottomRight,
            custom_x: 0,
            custom_y: 0,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl PlacementSpec {
    pub fn new(anchor: Anchor) -> Self {
        Self {
            anchor,
            ..Default::default()
        }
    }

    /// Custom placement at a fixed top-left coordinate.
    pub fn custom(x: i32, y: i32) -> Self {
        Self {
            anchor: Anchor::Custom,
            custom_x: x,
            custom_y: y,
            ..Default::default()
        }
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }
}

/// Clamp any caller-supplied opacity into the 0-255 range.
pub fn clamp_opacity(opacity: i64) -> u8 {
    opacity.clamp(0, 255) as u8
}

/// Text watermark parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TextWatermark {
    pub text: String,
    /// Font file stem, looked up as `<font_dir>/<font_name>.ttf`
    pub font_name: String,
    pub font_dir: PathBuf,
    pub font_size_px: u32,
    pub color: Color,
    pub opacity: u8,
}

impl TextWatermark {
    /// Create a text watermark with default font settings and white text.
    pub fn new(text: impl Into<String>, opacity: i64) -> Self {
        Self {
            text: text.into(),
            font_name: crate::constants::DEFAULT_FONT_NAME.to_string(),
            font_dir: PathBuf::from(crate::constants::DEFAULT_FONT_DIR),
            font_size_px: crate::constants::DEFAULT_FONT_SIZE_PX as u32,
            color: Color::white(),
            opacity: clamp_opacity(opacity),
        }
    }

    pub fn with_font(mut self, font_dir: impl Into<PathBuf>, font_name: impl Into<String>) -> Self {
        self.font_dir = font_dir.into();
        self.font_name = font_name.into();
        self
    }

    /// Sizes below one pixel are raised to one.
    pub fn with_size(mut self, font_size_px: u32) -> Self {
        self.font_size_px = font_size_px.max(1);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Path of the TrueType file this watermark asks for.
    pub fn font_path(&self) -> PathBuf {
        self.font_dir.join(format!("{}.ttf", self.font_name))
    }
}

/// Image watermark parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageWatermark {
    pub source_path: PathBuf,
    /// Upper bound for both sides after scaling
    pub max_dimension_px: u32,
    pub opacity: u8,
}

impl ImageWatermark {
    pub fn new(source_path: impl Into<PathBuf>, max_dimension_px: u32, opacity: i64) -> Self {
        Self {
            source_path: source_path.into(),
            max_dimension_px: max_dimension_px.max(1),
            opacity: clamp_opacity(opacity),
        }
    }
}

/// A watermark to apply: either rendered text or an image file.
#[derive(Debug, Clone, PartialEq)]
pub enum WatermarkSpec {
    Text(TextWatermark),
    Image(ImageWatermark),
}

impl WatermarkSpec {
    pub fn opacity(&self) -> u8 {
        match self {
            WatermarkSpec::Text(text) => text.opacity,
            WatermarkSpec::Image(image) => image.opacity,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            WatermarkSpec::Text(_) => "text",
            WatermarkSpec::Image(_) => "image",
        }
    }
}
