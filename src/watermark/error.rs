//! Watermark error types.
//!
//! These never reach the caller of the compositor. Each one marks a branch
//! where rendering degrades: a font that can't be loaded falls back to the
//! built-in font, an unreadable watermark image leaves the base untouched.

use std::fmt;

/// Errors that can occur while preparing a watermark.
#[derive(Debug)]
pub enum WatermarkError {
    /// The TrueType font could not be read or parsed
    FontError(String),

    /// The watermark image path does not point at a readable file
    SourceMissing(String),

    /// Failed to decode watermark image
    DecodeError(String),

    /// The watermark image has a zero-sized dimension
    EmptySource { width: u32, height: u32 },

    /// Resampling the watermark image failed
    ResizeError(String),
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontError(msg) => write!(f, "Failed to load font: {}", msg),
            Self::SourceMissing(path) => write!(f, "Watermark image not found: {}", path),
            Self::DecodeError(msg) => write!(f, "Failed to decode watermark image: {}", msg),
            Self::EmptySource { width, height } => {
                write!(f, "Watermark image has no pixels ({}x{})", width, height)
            }
            Self::ResizeError(msg) => write!(f, "Failed to resize watermark: {}", msg),
        }
    }
}

impl std::error::Error for WatermarkError {}
