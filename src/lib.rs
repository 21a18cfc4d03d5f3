//! # svg2dxf
//!
//! Batch converter from SVG vector drawings to DXF polylines measured in
//! millimeters, for CNC and laser-cutting workflows.
//!
//! ## Architecture
//!
//! svg2dxf is organized as a workspace with multiple crates:
//!
//! 1. **svg2dxf-core** - Coordinate record, length units, shared policies
//! 2. **svg2dxf-converter** - SVG import, metadata, discretization, DXF output
//! 3. **svg2dxf-settings** - Configuration file loading and validation
//! 4. **svg2dxf** - Command-line binary tying the crates together

use anyhow::{bail, Context};
use std::ffi::OsString;
use std::path::PathBuf;

pub use svg2dxf_converter::{
    BatchConverter, BatchSummary, ConversionOptions, FileReport, SvgToDxfConverter,
};
pub use svg2dxf_core::FailurePolicy;
pub use svg2dxf_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

pub const HELP: &str = "\
svg2dxf converts every SVG file in a directory into a millimeter DXF drawing.

USAGE:
  svg2dxf [OPTIONS]

OPTIONS:
  -c, --config FILE     Load settings from a .json or .toml file
  -i, --input DIR       Directory scanned for .svg files [default: ./svgs]
  -o, --output DIR      Directory receiving .dxf files [default: ./dxfs]
      --keep-going      Continue with the next file when one fails
  -V, --version         Prints version information
      --help            Prints this help

Set RUST_LOG to adjust log verbosity (default: info).
";

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Command-line overrides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub keep_going: bool,
}

/// What the binary was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Version,
    Convert(CliArgs),
}

/// Parse command-line arguments (without the program name).
pub fn parse_args(args: Vec<OsString>) -> anyhow::Result<Command> {
    let mut input = pico_args::Arguments::from_vec(args);

    if input.contains("--help") {
        return Ok(Command::Help);
    }

    if input.contains(["-V", "--version"]) {
        return Ok(Command::Version);
    }

    let cli = CliArgs {
        config: input.opt_value_from_os_str(["-c", "--config"], to_path)?,
        input: input.opt_value_from_os_str(["-i", "--input"], to_path)?,
        output: input.opt_value_from_os_str(["-o", "--output"], to_path)?,
        keep_going: input.contains("--keep-going"),
    };

    let remaining = input.finish();
    if !remaining.is_empty() {
        bail!("Unexpected arguments: {:?}", remaining);
    }

    Ok(Command::Convert(cli))
}

fn to_path(value: &std::ffi::OsStr) -> Result<PathBuf, String> {
    Ok(PathBuf::from(value))
}

/// Load the configuration file, if any, and apply command-line overrides.
pub fn resolve_config(cli: &CliArgs) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(input) = &cli.input {
        config.batch.input_dir = input.clone();
    }
    if let Some(output) = &cli.output {
        config.batch.output_dir = output.clone();
    }
    if cli.keep_going {
        config.batch.failure_policy = FailurePolicy::Continue;
    }

    Ok(config)
}

/// Conversion tunables carried by a configuration.
pub fn conversion_options(config: &Config) -> ConversionOptions {
    ConversionOptions {
        points_per_mm: config.conversion.points_per_mm,
        dedup_tolerance_mm: config.conversion.dedup_tolerance_mm,
        metadata: config.metadata.clone(),
    }
}

/// Batch converter described by a configuration.
pub fn batch_converter(config: &Config) -> BatchConverter {
    BatchConverter::new(&config.batch.input_dir, &config.batch.output_dir)
        .with_policy(config.batch.failure_policy)
        .with_options(conversion_options(config))
}
