use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use image::ImageFormat;
use imgdiff_core::handler::{image_from_bytes, load_file};
use imgdiff_core::DiffContainer;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "imgdiff-apply",
    about = "Apply a .diff file to a base image, or render it on its own"
)]
struct Cli {
    /// Path to .diff file
    diff: PathBuf,

    /// Image to add the diff onto; without it the diff magnitude is rendered
    #[arg(short, long)]
    base: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long)]
    output: PathBuf,

    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file = File::open(&cli.diff)
        .with_context(|| format!("failed to open {}", cli.diff.display()))?;
    let diff = DiffContainer::read_from(BufReader::new(file))
        .with_context(|| format!("failed to decode {}", cli.diff.display()))?;
    eprintln!(
        "Loaded {}: {}x{}, {} colors, {} pixels",
        cli.diff.display(),
        diff.width(),
        diff.height(),
        diff.color_count(),
        diff.pixel_count()
    );

    let image = match &cli.base {
        Some(base_path) => {
            let bytes = load_file(base_path)
                .with_context(|| format!("failed to read {}", base_path.display()))?;
            let base = image_from_bytes(&bytes)
                .with_context(|| format!("failed to decode {}", base_path.display()))?;
            if (base.width(), base.height()) != (diff.width() as u32, diff.height() as u32) {
                eprintln!(
                    "Warning: base is {}x{} but diff is {}x{}",
                    base.width(),
                    base.height(),
                    diff.width(),
                    diff.height()
                );
            }
            diff.compose_onto(&base)?
        }
        None => diff.as_image()?,
    };

    image
        .save_with_format(&cli.output, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    eprintln!("Wrote {}", cli.output.display());

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
