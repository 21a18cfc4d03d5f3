//! Error types for the converter crate.
//!
//! This module provides structured error types for metadata resolution,
//! SVG import, curve sampling, DXF emission and the per-file conversion that
//! ties them together.

use std::io;
use std::path::PathBuf;
use svg2dxf_core::UnitError;
use thiserror::Error;

/// Errors raised while resolving declared document metadata.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    /// A width or height value could not be parsed.
    #[error("Invalid {attribute} '{value}': {source}")]
    InvalidLength {
        attribute: &'static str,
        value: String,
        #[source]
        source: UnitError,
    },

    /// The viewBox value is malformed or unusable as a scale divisor.
    #[error("Invalid viewBox '{value}': {reason}")]
    InvalidViewBox { value: String, reason: String },

    /// A declared dimension cannot produce a positive scale factor.
    #[error("Invalid {attribute}: {value}mm (must be finite and > 0)")]
    InvalidDimension { attribute: &'static str, value: f64 },
}

/// Errors raised while reading an SVG document.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root element is not `<svg>`.
    #[error("Invalid SVG: root element is <{0}>, expected <svg>")]
    NotSvg(String),

    /// Path data in a `d` attribute could not be parsed.
    #[error("Invalid path data in <{element}>: {reason}")]
    PathData { element: String, reason: String },
}

/// Errors raised while sampling a curve into points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplingError {
    /// The curve's physical length overflowed or is not a number.
    #[error("Curve length {0}mm is not finite")]
    NonFiniteLength(f64),

    /// The curve would need more samples than allowed for one curve.
    #[error("Curve of {length_mm}mm needs {samples} samples (limit {limit})")]
    TooManySamples {
        length_mm: f64,
        samples: f64,
        limit: usize,
    },
}

/// Errors raised while writing a DXF document.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The DXF writer failed.
    #[error("DXF write error: {0}")]
    Dxf(#[from] dxf::DxfError),

    /// I/O error while writing the document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors that abort the conversion of one file.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output directory could not be created or listed.
    #[error("Directory error for {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The SVG document could not be imported.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Declared metadata could not be resolved.
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// A curve could not be sampled.
    #[error("Cannot sample path {index}: {source}")]
    Sampling {
        index: usize,
        #[source]
        source: SamplingError,
    },

    /// The DXF document could not be written.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Result type alias for converter operations.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Result type alias for metadata resolution.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Result type alias for SVG import.
pub type ImportResult<T> = Result<T, ImportError>;

/// Result type alias for curve sampling.
pub type SamplingResult<T> = Result<T, SamplingError>;

/// Result type alias for DXF emission.
pub type ExportResult<T> = Result<T, ExportError>;
