//! # svg2dxf Converter
//!
//! Converts SVG vector documents into DXF drawings measured in millimeters.
//!
//! ## Pipeline
//!
//! - **Import**: XML and path data into parametric curves in viewbox units
//! - **Metadata**: declared width, height and viewBox into a scale factor
//! - **Discretize**: length-proportional uniform sampling of each curve
//! - **Dedup**: per-axis collapsing of consecutive near-identical points
//! - **Export**: one open polyline per surviving point chain
//!
//! [`SvgToDxfConverter`] runs the pipeline for one document and
//! [`BatchConverter`] applies it to a directory of files.

pub mod curve;
pub mod dedup;
pub mod discretize;
pub mod error;
pub mod export;
pub mod import;
pub mod metadata;
pub mod pipeline;

pub use curve::{ParametricCurve, PathCurve, Segment};
pub use dedup::{dedup_points, DEDUP_TOLERANCE_MM};
pub use discretize::{sample_count, Discretization, Discretizer, MAX_SAMPLES, POINTS_PER_MM};
pub use error::{
    ConversionError, ConversionResult, ExportError, ImportError, MetadataError, SamplingError,
};
pub use export::DxfDocumentBuilder;
pub use import::{ParsedDocument, SvgImporter};
pub use metadata::{MetadataResolver, ResolvedMetadata, ViewBox};
pub use pipeline::{
    BatchConverter, BatchFailure, BatchSummary, ConversionOptions, CurveReport, FileReport,
    SvgToDxfConverter,
};
