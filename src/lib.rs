// Imprint watermarking library
//
// `watermark::processor::watermark` is the single-image entry point;
// `hook` and `batch` wrap it with decoding and format-preserving saves.

pub mod batch;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod hook;
pub mod logging;
pub mod watermark;

pub use config::WatermarkSettings;
pub use error::ImprintError;
pub use watermark::watermark;
