// Constants module - centralized default values for configuration
//
// Every default a caller can leave unset lives here so the settings layer,
// the hook and the batch tool agree on them.

// =============================================================================
// Placement defaults
// =============================================================================

/// Default distance in pixels between the watermark and the image edges
pub const DEFAULT_MARGIN: i32 = 10;

/// Default anchor name
pub const DEFAULT_POSITION: &str = "bottom_right";

// =============================================================================
// Watermark defaults
// =============================================================================

/// Default watermark opacity (0-255)
pub const DEFAULT_OPACITY: i64 = 128;

/// Default watermark text
pub const DEFAULT_TEXT: &str = "My Watermark";

/// Default text color
pub const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";

/// Default font name, resolved as `<font_dir>/<name>.ttf`
pub const DEFAULT_FONT_NAME: &str = "UltimatePixelFont";

/// Default directory searched for TrueType fonts
pub const DEFAULT_FONT_DIR: &str = "assets/fonts";

/// Default font size in pixels
pub const DEFAULT_FONT_SIZE_PX: i64 = 16;

/// Default image watermark shipped with the crate
pub const DEFAULT_IMAGE_PATH: &str = "assets/default_watermark.png";

/// Default bound on the longest side of an image watermark
pub const DEFAULT_MAX_SIZE_PX: i64 = 64;

// =============================================================================
// Built-in font
// =============================================================================

/// Cell size of the built-in bitmap font in pixels
pub const BUILTIN_GLYPH_SIZE: u32 = 8;

/// Character drawn when the built-in font has no glyph for the input
pub const BUILTIN_REPLACEMENT_CHAR: char = '?';

// =============================================================================
// Output defaults
// =============================================================================

/// Default JPEG quality used when re-encoding
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Extensions the post-save hook watermarks
pub const HOOK_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Extensions the batch tool picks up
pub const BATCH_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "tiff"];

// =============================================================================
// Environment
// =============================================================================

/// Prefix for environment variable overrides (`IMPRINT_OPACITY=200`)
pub const ENV_PREFIX: &str = "IMPRINT";
