use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use imprint::batch::{run_batch, BatchJob};
use imprint::config::WatermarkSettings;
use imprint::hook::{on_image_saved, HookOutcome};
use imprint::logging::{init_subscriber, LogFormat};
use std::path::PathBuf;

/// Imprint - text and image watermarks for saved images
#[derive(Parser, Debug)]
#[command(name = "imprint")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a YAML settings file (defaults plus IMPRINT_* variables if omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log output format: text or json
    #[arg(long, global = true, default_value = "text")]
    log_format: LogFormat,

    /// Worker threads for batch runs (0 = one per core)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Watermark files in place, as the post-save hook does
    Apply(ApplyArgs),

    /// Watermark many files, optionally into another directory
    Batch(BatchArgs),

    /// Print the effective settings as YAML
    Settings,
}

#[derive(Args, Debug)]
struct ApplyArgs {
    /// Files that were just saved
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Individual image files
    files: Vec<PathBuf>,

    /// Directory whose images are added to the batch
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output directory; sources are overwritten if omitted
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_subscriber(cli.log_format) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let settings = match &cli.config {
        Some(path) => WatermarkSettings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => WatermarkSettings::from_env().context("loading settings from environment")?,
    };

    let (spec, _) = settings.to_spec();
    tracing::info!(
        config_file = ?cli.config,
        mode = spec.kind(),
        position = %settings.anchor(),
        opacity = settings.opacity,
        "Settings loaded"
    );

    match cli.command {
        Commands::Apply(args) => apply(&args, &settings),
        Commands::Batch(args) => batch(args, &settings, cli.threads),
        Commands::Settings => {
            print!("{}", serde_yaml::to_string(&settings)?);
            Ok(())
        }
    }
}

fn apply(args: &ApplyArgs, settings: &WatermarkSettings) -> Result<()> {
    let mut failed = 0;
    for path in &args.paths {
        if let HookOutcome::Failed(_) = on_image_saved(path, settings) {
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} files failed", failed, args.paths.len());
    }
    Ok(())
}

fn batch(args: BatchArgs, settings: &WatermarkSettings, threads: usize) -> Result<()> {
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring worker threads")?;
    }

    let job = BatchJob {
        files: args.files,
        input_dir: args.input_dir,
        output_dir: args.output_dir,
    };

    let report = run_batch(&job, settings)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.failures.is_empty() {
        bail!("{} files failed", report.failures.len());
    }
    Ok(())
}
