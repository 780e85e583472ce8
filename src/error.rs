// Error types module

use crate::watermark::WatermarkError;
use thiserror::Error;

/// Crate-level error for the settings, codec, hook and batch layers.
///
/// Watermark rendering itself never returns this: its failures degrade to
/// the unmodified image. These errors cover the surrounding plumbing, where
/// a file can't be read, decoded or written.
#[derive(Error, Debug)]
pub enum ImprintError {
    /// Invalid YAML, missing environment variables, unreadable config file
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// The file's encoding could not be determined or written
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Watermark(#[from] WatermarkError),
}

impl From<::config::ConfigError> for ImprintError {
    fn from(err: ::config::ConfigError) -> Self {
        ImprintError::Config(err.to_string())
    }
}
