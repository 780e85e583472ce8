//! Batch watermarking
//!
//! Collects images from an explicit file list and an optional input
//! directory, then watermarks each one independently on the rayon thread
//! pool. A file that fails is logged and left out of the results; the rest
//! of the batch carries on.

use crate::codec::{has_extension, load_image, save_image};
use crate::config::WatermarkSettings;
use crate::constants::BATCH_EXTENSIONS;
use crate::error::ImprintError;
use crate::watermark::watermark;
use glob::{MatchOptions, Pattern};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Inputs and destination of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchJob {
    /// Individually chosen files
    pub files: Vec<PathBuf>,
    /// Directory whose images (non-recursive) are added to `files`
    pub input_dir: Option<PathBuf>,
    /// Where results are written; `None` overwrites the sources
    pub output_dir: Option<PathBuf>,
}

/// A successfully watermarked file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchItem {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// A file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a batch run, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub processed: Vec<BatchItem>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.processed.is_empty() && self.failures.is_empty()
    }
}

/// Merge explicit files and directory contents into one de-duplicated list.
///
/// Explicit files come first in the order given, followed by the
/// directory's entries sorted by name. Only recognized image extensions are
/// kept and the first occurrence of a path wins.
pub fn collect_paths(job: &BatchJob) -> Vec<PathBuf> {
    let mut candidates = job.files.clone();
    if let Some(dir) = &job.input_dir {
        candidates.extend(list_directory(dir));
    }

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|path| has_extension(path, BATCH_EXTENSIONS))
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// Images directly inside `dir`, matched case-insensitively by extension.
fn list_directory(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "Input directory does not exist");
        return Vec::new();
    }

    let Some(dir_str) = dir.to_str() else {
        tracing::warn!(dir = %dir.display(), "Input directory is not valid UTF-8");
        return Vec::new();
    };
    let prefix = Pattern::escape(dir_str);
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut paths: Vec<PathBuf> = Vec::new();
    for ext in BATCH_EXTENSIONS {
        let pattern = format!("{}/*.{}", prefix, ext);
        match glob::glob_with(&pattern, options) {
            Ok(matches) => paths.extend(
                matches
                    .filter_map(|entry| entry.ok())
                    .filter(|path| path.is_file()),
            ),
            Err(e) => {
                tracing::warn!(pattern = %pattern, error = %e, "Invalid glob pattern");
            }
        }
    }
    paths.sort();
    paths.dedup();
    paths
}

/// Where `input` is written for this job.
pub fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    match (output_dir, input.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => input.to_path_buf(),
    }
}

/// Watermark every collected file.
///
/// Fails only if the output directory can't be created; per-file problems
/// end up in [`BatchReport::failures`].
pub fn run_batch(job: &BatchJob, settings: &WatermarkSettings) -> Result<BatchReport, ImprintError> {
    let paths = collect_paths(job);

    if paths.is_empty() {
        tracing::warn!("No images found. Pass files or a valid input directory.");
        return Ok(BatchReport::default());
    }

    if let Some(dir) = &job.output_dir {
        std::fs::create_dir_all(dir)?;
    }

    tracing::info!(
        files = paths.len(),
        output_dir = ?job.output_dir,
        "Starting batch watermarking"
    );

    let planned = plan_outputs(&paths, job.output_dir.as_deref());

    let results: Vec<Result<BatchItem, BatchFailure>> = planned
        .par_iter()
        .map(|(input, output)| {
            let output = output.as_ref().map_err(BatchFailure::clone)?;
            process_file(input, output, settings).map_err(|e| BatchFailure {
                path: input.clone(),
                reason: e.to_string(),
            })
        })
        .inspect(|result| {
            if let Err(failure) = result {
                tracing::warn!(
                    path = %failure.path.display(),
                    error = %failure.reason,
                    "Failed to process image"
                );
            }
        })
        .collect();

    let mut report = BatchReport::default();
    for result in results {
        match result {
            Ok(item) => report.processed.push(item),
            Err(failure) => report.failures.push(failure),
        }
    }

    tracing::info!(
        processed = report.processed.len(),
        failed = report.failures.len(),
        "Batch watermarking complete"
    );

    Ok(report)
}

/// Pair every input with its output path. When two inputs share a file
/// name in the output directory the first keeps it and the rest fail.
fn plan_outputs(
    paths: &[PathBuf],
    output_dir: Option<&Path>,
) -> Vec<(PathBuf, Result<PathBuf, BatchFailure>)> {
    let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::new();

    paths
        .iter()
        .map(|input| {
            let output = output_path(input, output_dir);
            let planned = match claimed.get(&output) {
                Some(first) => Err(BatchFailure {
                    path: input.clone(),
                    reason: format!(
                        "output {} is already written by {}",
                        output.display(),
                        first.display()
                    ),
                }),
                None => {
                    claimed.insert(output.clone(), input);
                    Ok(output)
                }
            };
            (input.clone(), planned)
        })
        .collect()
}

fn process_file(
    input: &Path,
    output: &Path,
    settings: &WatermarkSettings,
) -> Result<BatchItem, ImprintError> {
    let loaded = load_image(input)?;
    let result = watermark(&loaded.image, settings);

    save_image(&result, output, loaded.format, settings.jpeg_quality())?;

    Ok(BatchItem {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        width: result.width(),
        height: result.height(),
    })
}
