//! bmpedit - edge detection and rotation for 24-bit BMP files

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bmpedit::{Limits, Operation, Unstoppable};
use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "bmpedit")]
#[command(author, version, about = "Edge detection and rotation for 24-bit BMP files")]
#[command(long_about = "
Reads an uncompressed 24-bit BMP, applies one edit, and writes a new BMP.

Operations:
  edtrunc   edge detection, sums masked to the low byte
  edmag     edge detection, absolute value clipped to 255
  rotr      rotate 90 degrees right
  rotl      rotate 90 degrees left

Examples:
  bmpedit edmag photo.bmp edges.bmp
  bmpedit rotr photo.bmp rotated.bmp
")]
struct Cli {
    /// Operation: edtrunc, edmag, rotr, rotl
    operation: Operation,

    /// Input BMP file
    input: PathBuf,

    /// Output BMP file (must differ from input)
    output: PathBuf,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Refuse images wider than this
    #[arg(long)]
    max_width: Option<u64>,

    /// Refuse images taller than this
    #[arg(long)]
    max_height: Option<u64>,

    /// Refuse images with more pixels than this
    #[arg(long)]
    max_pixels: Option<u64>,

    /// Refuse images whose pixel buffer would exceed this many bytes
    #[arg(long)]
    max_memory: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        // Usage errors exit 1; --help and --version exit 0.
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        std::process::exit(code);
    });

    init_logging(cli.verbose, cli.quiet);
    run(&cli)
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    ensure_distinct(&cli.input, &cli.output)?;

    let limits = Limits {
        max_width: cli.max_width,
        max_height: cli.max_height,
        max_pixels: cli.max_pixels,
        max_memory_bytes: cli.max_memory,
    };

    let data = fs::read(&cli.input)
        .with_context(|| format!("Cannot open file: {}", cli.input.display()))?;
    info!(input = %cli.input.display(), bytes = data.len(), op = %cli.operation, "loaded");

    let encoded = bmpedit::process(cli.operation, &data, Some(&limits), &Unstoppable)
        .with_context(|| format!("Failed to process: {}", cli.input.display()))?;

    fs::write(&cli.output, &encoded)
        .with_context(|| format!("Failed to write: {}", cli.output.display()))?;
    info!(output = %cli.output.display(), bytes = encoded.len(), "saved");

    Ok(())
}

/// Reject an output path that names the input file.
fn ensure_distinct(input: &Path, output: &Path) -> Result<()> {
    let same = input == output
        || matches!(
            (fs::canonicalize(input), fs::canonicalize(output)),
            (Ok(a), Ok(b)) if a == b
        );
    if same {
        bail!(
            "Output file name is the same as input file name: {}",
            output.display()
        );
    }
    Ok(())
}
