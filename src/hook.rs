//! Post-save hook
//!
//! Called once per file right after a host application writes it. The hook
//! rewrites the file in place with the watermark applied. It never fails
//! outward: the file on disk is either watermarked or left as it was.

use crate::codec::{format_name, has_extension, load_image, save_image};
use crate::config::WatermarkSettings;
use crate::constants::HOOK_EXTENSIONS;
use crate::error::ImprintError;
use crate::watermark::watermark;
use std::path::Path;

/// What the hook did with a saved file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// Watermarking is turned off in the settings
    Disabled,
    /// The file's extension is not one the hook handles
    Skipped,
    /// The file was watermarked and rewritten
    Applied,
    /// Something went wrong; the message was logged
    Failed(String),
}

/// Watermark the file at `path` in place.
pub fn on_image_saved(path: &Path, settings: &WatermarkSettings) -> HookOutcome {
    if !settings.enabled {
        return HookOutcome::Disabled;
    }

    if !has_extension(path, HOOK_EXTENSIONS) {
        tracing::debug!(path = %path.display(), "Not a watermarkable image, skipping");
        return HookOutcome::Skipped;
    }

    match watermark_in_place(path, settings) {
        Ok(()) => HookOutcome::Applied,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to apply watermark"
            );
            HookOutcome::Failed(e.to_string())
        }
    }
}

fn watermark_in_place(path: &Path, settings: &WatermarkSettings) -> Result<(), ImprintError> {
    let loaded = load_image(path)?;
    let result = watermark(&loaded.image, settings);
    save_image(&result, path, loaded.format, settings.jpeg_quality())?;

    tracing::info!(
        path = %path.display(),
        format = format_name(loaded.format),
        "Watermark applied"
    );
    Ok(())
}
