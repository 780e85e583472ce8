//! Watermark module for applying text and image watermarks to images.
//!
//! # Features
//!
//! - **Text watermarks** rendered from a TrueType font, or the built-in
//!   bitmap font when the requested one is unavailable
//! - **Image watermarks** scaled to fit a bounding square, faded by an
//!   opacity that multiplies the image's own alpha
//! - **6 anchors**: four corners with a margin, center, and custom offsets
//!
//! # Pipeline
//!
//! ```text
//! WatermarkSpec ─┬─ Text  ─ font ─ measure ─ resolve_position ─ overlay ─ alpha_composite
//!                └─ Image ─ decode ─ scale ─ fade ─ resolve_position ─ paste_with_mask
//! ```
//!
//! Every stage is a pure function of its inputs apart from read-only font
//! and image loading, so watermarking may run on many threads at once.

pub mod compositor;
pub mod error;
pub mod font;
pub mod position;
pub mod processor;
pub mod spec;
pub mod text_renderer;

// Re-export main types for convenience
pub use compositor::{alpha_composite, paste_with_mask};
pub use error::WatermarkError;
pub use font::{load_font, WatermarkFont};
pub use position::{
    is_visible, resolve_position, ImageDimensions, PlacementPosition, WatermarkDimensions,
};
pub use processor::{
    apply_opacity, apply_watermark, render_image_watermark, render_text_watermark,
    scale_watermark, scaled_dimensions, watermark,
};
pub use spec::{
    clamp_opacity, Anchor, ImageWatermark, PlacementSpec, TextWatermark, WatermarkSpec,
};
pub use text_renderer::{parse_color, render_text_overlay, Color};
