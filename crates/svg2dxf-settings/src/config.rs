//! Configuration file handling for svg2dxf
//!
//! Configuration is organized into sections:
//! - Conversion tunables (sampling density, dedup tolerance)
//! - Metadata defaults for documents that omit width, height or viewBox
//! - Batch settings (input and output directories, failure policy)
//!
//! Files are JSON or TOML, chosen by extension. Every section and key is
//! optional; missing values take their defaults.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use svg2dxf_converter::{MetadataResolver, DEDUP_TOLERANCE_MM, POINTS_PER_MM};
use svg2dxf_core::{FailurePolicy, MetadataDefaults};
use tracing::debug;

/// Default directory scanned for `.svg` files.
pub const DEFAULT_INPUT_DIR: &str = "./svgs";
/// Default directory receiving `.dxf` files.
pub const DEFAULT_OUTPUT_DIR: &str = "./dxfs";

/// Sampling and deduplication tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// Samples per millimeter of physical curve length
    pub points_per_mm: f64,
    /// Per-axis deduplication tolerance in millimeters
    pub dedup_tolerance_mm: f64,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            points_per_mm: POINTS_PER_MM,
            dedup_tolerance_mm: DEDUP_TOLERANCE_MM,
        }
    }
}

/// Batch run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub failure_policy: FailurePolicy,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// Complete svg2dxf configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub conversion: ConversionSettings,
    pub metadata: MetadataDefaults,
    pub batch: BatchSettings,
}

#[derive(Clone, Copy)]
enum Format {
    Json,
    Toml,
}

fn format_for(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
        _ => Err(SettingsError::UnsupportedFormat(path.to_path_buf())),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_for(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_for(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let density = self.conversion.points_per_mm;
        if !density.is_finite() || density <= 0.0 {
            return Err(SettingsError::invalid(
                "conversion.points_per_mm",
                format!("{} must be finite and > 0", density),
            ));
        }

        let tolerance = self.conversion.dedup_tolerance_mm;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(SettingsError::invalid(
                "conversion.dedup_tolerance_mm",
                format!("{} must be finite and >= 0", tolerance),
            ));
        }

        // Defaults are used verbatim when a document omits its metadata, so
        // they must resolve on their own.
        MetadataResolver::new(self.metadata.clone())
            .resolve(None, None, None)
            .map_err(|e| SettingsError::invalid("metadata", e.to_string()))?;

        if self.batch.input_dir.as_os_str().is_empty() {
            return Err(SettingsError::invalid("batch.input_dir", "must not be empty"));
        }
        if self.batch.output_dir.as_os_str().is_empty() {
            return Err(SettingsError::invalid("batch.output_dir", "must not be empty"));
        }

        Ok(())
    }
}
