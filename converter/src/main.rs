use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context};
use clap::Parser;
use image::{DynamicImage, ImageFormat};
use imgdiff_core::handler::{image_from_bytes, load_file};
use imgdiff_core::{compare, DiffContainer};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "imgdiff", about = "Compute a sparse per-pixel diff between two images")]
struct Cli {
    /// Original image
    image1: PathBuf,

    /// Target image
    image2: PathBuf,

    /// Output base name: writes diff_<NAME> (PNG rendering) and <NAME>.diff
    output: PathBuf,

    /// Re-read the written .diff file and check it matches the computed diff
    #[arg(long)]
    verify: bool,

    /// Also write image1 with the diff applied back onto it
    #[arg(long, value_name = "PATH")]
    reconstruct: Option<PathBuf>,

    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (render_path, diff_path) = output_paths(&cli.output)?;

    let first = load_image(&cli.image1)?;
    let second = load_image(&cli.image2)?;
    if (first.width(), first.height()) != (second.width(), second.height()) {
        eprintln!(
            "Warning: sizes differ ({}x{} vs {}x{}), diffing over the larger extent",
            first.width(),
            first.height(),
            second.width(),
            second.height()
        );
    }

    let diff = compare(&first, &second)?;
    eprintln!(
        "Diff: {}x{}, {} colors, {} pixels",
        diff.width(),
        diff.height(),
        diff.color_count(),
        diff.pixel_count()
    );

    diff.as_image()?
        .save_with_format(&render_path, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", render_path.display()))?;
    eprintln!("Wrote {}", render_path.display());

    {
        let file = File::create(&diff_path)
            .with_context(|| format!("failed to create {}", diff_path.display()))?;
        diff.write_to(BufWriter::new(file))
            .with_context(|| format!("failed to write {}", diff_path.display()))?;
    }
    eprintln!(
        "Wrote {} ({} bytes)",
        diff_path.display(),
        diff.encoded_len()
    );

    if let Some(path) = &cli.reconstruct {
        diff.compose_onto(&first)?
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Wrote {}", path.display());
    }

    if cli.verify {
        let file = File::open(&diff_path)
            .with_context(|| format!("failed to open {}", diff_path.display()))?;
        let loaded = DiffContainer::read_from(BufReader::new(file))
            .with_context(|| format!("failed to decode {}", diff_path.display()))?;
        ensure!(
            loaded == diff,
            "{} does not decode to the computed diff",
            diff_path.display()
        );
        eprintln!("Verified {}", diff_path.display());
    }

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

fn load_image(path: &Path) -> anyhow::Result<DynamicImage> {
    let bytes = load_file(path).with_context(|| format!("failed to read {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "loaded image file");
    image_from_bytes(&bytes).with_context(|| format!("failed to decode {}", path.display()))
}

/// `diff_<name>` and `<name>.diff`, both next to `base`.
fn output_paths(base: &Path) -> anyhow::Result<(PathBuf, PathBuf)> {
    let name = base
        .file_name()
        .with_context(|| format!("invalid output name: {}", base.display()))?;

    let mut render_name = OsString::from("diff_");
    render_name.push(name);
    let mut diff_name = name.to_os_string();
    diff_name.push(".diff");

    Ok((base.with_file_name(render_name), base.with_file_name(diff_name)))
}
