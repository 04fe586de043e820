//! Intel HEX to SPI stimulus converter CLI.
//!
//! This binary provides a single entry point for the converter. It performs:
//! 1. **Convert:** Load a hex image and print sequenced or timed SPI stimulus on stdout.
//! 2. **Check:** Validate a timed stimulus file the way the bench schedules it.
//! 3. **Segments:** List the contiguous address ranges of a hex image.
//!
//! With no subcommand it converts `Blink.ino.hex` in the working directory using the
//! default (sequenced) settings.

use std::io::{self, BufWriter, Write};
use std::process;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ihex2spi_core::config::{Config, Mode};
use ihex2spi_core::stimulus::{self, read_stimulus};
use ihex2spi_core::{HexImage, Result};

#[derive(Parser, Debug)]
#[command(
    name = "ihex2spi",
    author,
    version,
    about = "Intel HEX to SPI bootloader stimulus converter",
    long_about = "Convert a firmware image into the SPI transaction stimulus read by the bootloader test bench.\n\nStimulus goes to stdout; logs go to stderr (filter with RUST_LOG).\n\nExamples:\n  ihex2spi\n  ihex2spi convert Blink.ino.hex --timed > blink.txt\n  ihex2spi check blink.txt"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a hex image into stimulus.
    Convert {
        /// Intel HEX image (default: Blink.ino.hex).
        input: Option<String>,

        /// Emit cycle-stamped writes instead of sequenced writes and read-backs.
        #[arg(long)]
        timed: bool,

        /// JSON file selecting the mode and timed schedule.
        #[arg(short, long)]
        config: Option<String>,

        /// Print conversion statistics to stderr.
        #[arg(long)]
        stats: bool,
    },

    /// Validate a timed stimulus file.
    Check {
        /// Stimulus file path.
        path: String,
    },

    /// List the segments of a hex image.
    Segments {
        /// Intel HEX image.
        #[arg(default_value = ihex2spi_core::common::constants::DEFAULT_INPUT)]
        input: String,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            timed,
            config,
            stats,
        }) => cmd_convert(input, timed, config, stats),
        Some(Commands::Check { path }) => cmd_check(&path),
        Some(Commands::Segments { input }) => cmd_segments(&input),
        None => cmd_convert(None, false, None, false),
    };

    if let Err(e) = result {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Loads the image, runs the configured emitter, and renders to stdout.
fn cmd_convert(
    input: Option<String>,
    timed: bool,
    config_path: Option<String>,
    stats: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };
    if let Some(input) = input {
        config.input = input;
    }
    if timed {
        config.mode = Mode::Timed;
    }
    config.validate()?;
    info!(input = %config.input, mode = ?config.mode, "converting");

    let image = HexImage::load(&config.input)?;
    if let Some(start) = image.start_address() {
        info!(?start, "image carries a start address");
    }

    let output = stimulus::convert(&image, &config);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    output.render(&mut out)?;

    if stats {
        output.stats.write_summary(&mut io::stderr().lock())?;
    }
    Ok(())
}

/// Parses a timed stimulus file and reports its span.
fn cmd_check(path: &str) -> Result<()> {
    let txns = read_stimulus(path)?;
    let mut out = io::stdout().lock();
    match (txns.first(), txns.last()) {
        (Some(first), Some(last)) => writeln!(
            out,
            "{path}: {} transactions, cycles {}..={}",
            txns.len(),
            first.cycle,
            last.cycle
        )?,
        _ => writeln!(out, "{path}: no transactions")?,
    }
    Ok(())
}

/// Prints each segment's banner and length.
fn cmd_segments(input: &str) -> Result<()> {
    let image = HexImage::load(input)?;
    let mut out = io::stdout().lock();
    for segment in image.segments() {
        writeln!(
            out,
            "{} ({} bytes)",
            stimulus::Entry::Banner(segment),
            segment.len()
        )?;
    }
    Ok(())
}
