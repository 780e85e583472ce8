//! Watermark settings.
//!
//! Settings come from an optional YAML file and `IMPRINT_*` environment
//! variables, layered in that order. `${VAR}` references inside the YAML are
//! substituted before parsing.
//!
//! ```yaml
//! enabled: true
//! use_image_watermark: false
//! text: "© ${STUDIO_NAME}"
//! text_color: "255,200,0"
//! font_name: UltimatePixelFont
//! font_size_px: 16
//! opacity: 180
//! position: bottom_right
//! ```
//!
//! Nothing here rejects odd values. Out-of-range numbers are clamped by
//! [`WatermarkSettings::normalize`], unknown colors become white and unknown
//! positions become `bottom_right`.

use crate::constants::{
    DEFAULT_FONT_DIR, DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE_PX, DEFAULT_IMAGE_PATH,
    DEFAULT_JPEG_QUALITY, DEFAULT_MARGIN, DEFAULT_MAX_SIZE_PX, DEFAULT_OPACITY, DEFAULT_POSITION,
    DEFAULT_TEXT, DEFAULT_TEXT_COLOR, ENV_PREFIX,
};
use crate::error::ImprintError;
use crate::watermark::{
    parse_color, Anchor, Color, ImageWatermark, PlacementSpec, TextWatermark, WatermarkSpec,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Default values
fn default_enabled() -> bool {
    true
}

fn default_text() -> String {
    DEFAULT_TEXT.to_string()
}

fn default_text_color() -> String {
    DEFAULT_TEXT_COLOR.to_string()
}

fn default_font_name() -> String {
    DEFAULT_FONT_NAME.to_string()
}

fn default_font_dir() -> PathBuf {
    PathBuf::from(DEFAULT_FONT_DIR)
}

fn default_font_size_px() -> i64 {
    DEFAULT_FONT_SIZE_PX
}

fn default_image_path() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGE_PATH)
}

fn default_max_size_px() -> i64 {
    DEFAULT_MAX_SIZE_PX
}

fn default_opacity() -> i64 {
    DEFAULT_OPACITY
}

fn default_position() -> String {
    DEFAULT_POSITION.to_string()
}

fn default_margin() -> i64 {
    DEFAULT_MARGIN as i64
}

fn default_jpeg_quality() -> i64 {
    DEFAULT_JPEG_QUALITY as i64
}

/// Everything a caller can configure about the watermark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkSettings {
    /// Whether the post-save hook watermarks at all (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Use the image watermark instead of text (default: false)
    #[serde(default)]
    pub use_image_watermark: bool,

    /// Watermark text; empty disables text watermarking (default: "My Watermark")
    #[serde(default = "default_text")]
    pub text: String,

    /// `#RRGGBB` or `r,g,b` (default: "#FFFFFF")
    #[serde(default = "default_text_color")]
    pub text_color: String,

    /// Force black text regardless of `text_color` (default: false)
    #[serde(default)]
    pub text_black: bool,

    /// Font file stem looked up in `font_dir` (default: "UltimatePixelFont")
    #[serde(default = "default_font_name")]
    pub font_name: String,

    #[serde(default = "default_font_dir")]
    pub font_dir: PathBuf,

    /// Font size in pixels (default: 16)
    #[serde(default = "default_font_size_px")]
    pub font_size_px: i64,

    /// Image watermark file (default: the bundled asset)
    #[serde(default = "default_image_path")]
    pub image_path: PathBuf,

    /// Longest side of the scaled image watermark (default: 64)
    #[serde(default = "default_max_size_px")]
    pub max_size_px: i64,

    /// 0 (invisible) to 255 (opaque) (default: 128)
    #[serde(default = "default_opacity")]
    pub opacity: i64,

    /// top_left, top_right, bottom_left, bottom_right, center or custom
    #[serde(default = "default_position")]
    pub position: String,

    #[serde(default)]
    pub custom_x: i64,

    #[serde(default)]
    pub custom_y: i64,

    /// Edge distance for corner positions (default: 10)
    #[serde(default = "default_margin")]
    pub margin: i64,

    /// Quality used when re-encoding JPEG output (default: 90)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: i64,
}

impl Default for WatermarkSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            use_image_watermark: false,
            text: default_text(),
            text_color: default_text_color(),
            text_black: false,
            font_name: default_font_name(),
            font_dir: default_font_dir(),
            font_size_px: default_font_size_px(),
            image_path: default_image_path(),
            max_size_px: default_max_size_px(),
            opacity: default_opacity(),
            position: default_position(),
            custom_x: 0,
            custom_y: 0,
            margin: default_margin(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl WatermarkSettings {
    /// Parse YAML, substituting `${VAR}` references and applying `IMPRINT_*`
    /// environment overrides.
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, ImprintError> {
        Self::from_sources(yaml, ENV_PREFIX)
    }

    /// Like [`from_yaml_with_env`](Self::from_yaml_with_env) with a custom
    /// environment prefix.
    pub fn from_sources(yaml: &str, env_prefix: &str) -> Result<Self, ImprintError> {
        let substituted = substitute_env_vars(yaml)?;

        let settings: WatermarkSettings = ::config::Config::builder()
            .add_source(::config::File::from_str(&substituted, ::config::FileFormat::Yaml))
            .add_source(::config::Environment::with_prefix(env_prefix).try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(settings.normalize())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ImprintError> {
        let yaml = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ImprintError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_yaml_with_env(&yaml)
    }

    /// Defaults plus environment overrides, for when no file is given.
    pub fn from_env() -> Result<Self, ImprintError> {
        Self::from_yaml_with_env("")
    }

    /// Clamp numeric fields into their usable ranges.
    pub fn normalize(mut self) -> Self {
        self.opacity = self.opacity.clamp(0, 255);
        self.font_size_px = self.font_size_px.max(1);
        self.max_size_px = self.max_size_px.max(1);
        self.margin = self.margin.max(0);
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        self
    }

    pub fn anchor(&self) -> Anchor {
        Anchor::parse(&self.position)
    }

    pub fn text_color(&self) -> Color {
        if self.text_black {
            Color::black()
        } else {
            parse_color(&self.text_color)
        }
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100) as u8
    }

    /// Build the watermark and placement descriptors these settings describe.
    pub fn to_spec(&self) -> (WatermarkSpec, PlacementSpec) {
        let spec = if self.use_image_watermark {
            WatermarkSpec::Image(ImageWatermark::new(
                self.image_path.clone(),
                to_u32(self.max_size_px),
                self.opacity,
            ))
        } else {
            WatermarkSpec::Text(
                TextWatermark::new(self.text.clone(), self.opacity)
                    .with_font(self.font_dir.clone(), self.font_name.clone())
                    .with_size(to_u32(self.font_size_px))
                    .with_color(self.text_color()),
            )
        };

        let placement = PlacementSpec {
            anchor: self.anchor(),
            custom_x: to_i32(self.custom_x),
            custom_y: to_i32(self.custom_y),
            margin: to_i32(self.margin.max(0)),
        };

        (spec, placement)
    }
}

fn to_u32(value: i64) -> u32 {
    value.clamp(1, u32::MAX as i64) as u32
}

fn to_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Replace `${VAR_NAME}` with the variable's value, failing on unset ones.
fn substitute_env_vars(yaml: &str) -> Result<String, ImprintError> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ImprintError::Config(e.to_string()))?;

    let mut missing = None;
    let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
        let var_name = &caps[1];
        match std::env::var(var_name) {
            Ok(value) => value,
            Err(_) => {
                missing.get_or_insert_with(|| var_name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(var_name) => Err(ImprintError::Config(format!(
            "Environment variable '{}' is referenced but not set",
            var_name
        ))),
        None => Ok(substituted.into_owned()),
    }
}
