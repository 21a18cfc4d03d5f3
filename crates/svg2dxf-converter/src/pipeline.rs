//! File and batch conversion
//!
//! One SVG document is processed to completion (parse, resolve metadata,
//! discretize every curve, emit) before the next begins. Batch runs walk an
//! input directory in file-name order and write one DXF per SVG with the same
//! base name.

use crate::dedup::{build_chain, DEDUP_TOLERANCE_MM};
use crate::discretize::{Discretizer, POINTS_PER_MM};
use crate::error::{ConversionError, ConversionResult};
use crate::export::DxfDocumentBuilder;
use crate::import::{ParsedDocument, SvgImporter};
use crate::metadata::{MetadataResolver, ResolvedMetadata};
use std::fs;
use std::path::{Path, PathBuf};
use svg2dxf_core::units::format_mm;
use svg2dxf_core::{FailurePolicy, MetadataDefaults};
use tracing::{debug, error, info, warn};

/// Tunables for a conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOptions {
    /// Samples per millimeter of physical curve length
    pub points_per_mm: f64,
    /// Per-axis deduplication tolerance in millimeters
    pub dedup_tolerance_mm: f64,
    /// Metadata used when the document omits width, height or viewBox
    pub metadata: MetadataDefaults,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            points_per_mm: POINTS_PER_MM,
            dedup_tolerance_mm: DEDUP_TOLERANCE_MM,
            metadata: MetadataDefaults::default(),
        }
    }
}

/// Outcome for a single curve
#[derive(Debug, Clone, PartialEq)]
pub struct CurveReport {
    pub index: usize,
    pub physical_length_mm: f64,
    /// Raw sample points before deduplication
    pub raw_points: usize,
    /// Points remaining after deduplication
    pub points: usize,
    /// Whether a polyline was written for this curve
    pub emitted: bool,
}

/// Outcome for a single document
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub name: String,
    pub metadata: ResolvedMetadata,
    pub curves: Vec<CurveReport>,
}

impl FileReport {
    pub fn emitted_polylines(&self) -> usize {
        self.curves.iter().filter(|c| c.emitted).count()
    }
}

/// Converts SVG documents into millimeter DXF drawings
#[derive(Debug, Clone)]
pub struct SvgToDxfConverter {
    importer: SvgImporter,
    resolver: MetadataResolver,
    discretizer: Discretizer,
    tolerance: f64,
}

impl Default for SvgToDxfConverter {
    fn default() -> Self {
        Self::new(ConversionOptions::default())
    }
}

impl SvgToDxfConverter {
    pub fn new(options: ConversionOptions) -> Self {
        Self {
            importer: SvgImporter::new(),
            resolver: MetadataResolver::new(options.metadata),
            discretizer: Discretizer::new(options.points_per_mm),
            tolerance: options.dedup_tolerance_mm,
        }
    }

    /// Discretize and emit every curve of an already parsed document.
    pub fn convert_document(
        &self,
        name: &str,
        document: &ParsedDocument,
    ) -> ConversionResult<(DxfDocumentBuilder, FileReport)> {
        let metadata = self.resolver.resolve_document(document)?;
        info!(
            "SVG {}: {}×{}mm",
            name,
            format_mm(metadata.width_mm),
            format_mm(metadata.height_mm)
        );
        debug!("Scale factor: {}", metadata.scale_factor);

        let mut builder = DxfDocumentBuilder::new();
        let mut curves = Vec::with_capacity(document.curves.len());

        for (index, curve) in document.curves.iter().enumerate() {
            let sampled = self
                .discretizer
                .discretize(curve, metadata.scale_factor)
                .map_err(|source| ConversionError::Sampling { index, source })?;
            let raw_points = sampled.points.len();

            let (points, emitted) = match build_chain(&sampled.points, self.tolerance) {
                Some(chain) => (chain.len(), builder.add_polyline(&chain)),
                None => {
                    debug!("Path {} collapsed below two points, skipped", index);
                    (0, false)
                }
            };

            info!(
                "Path {}: {} mm → {} points",
                index,
                format_mm(sampled.physical_length_mm),
                points
            );

            curves.push(CurveReport {
                index,
                physical_length_mm: sampled.physical_length_mm,
                raw_points,
                points,
                emitted,
            });
        }

        let report = FileReport {
            name: name.to_string(),
            metadata,
            curves,
        };
        Ok((builder, report))
    }

    /// Convert SVG text into a DXF builder ready to be written.
    pub fn convert_str(
        &self,
        name: &str,
        svg_content: &str,
    ) -> ConversionResult<(DxfDocumentBuilder, FileReport)> {
        let document = self.importer.import_string(svg_content)?;
        self.convert_document(name, &document)
    }

    /// Convert one SVG file and write the result to `dxf_path`.
    pub fn convert_file(&self, svg_path: &Path, dxf_path: &Path) -> ConversionResult<FileReport> {
        let content = fs::read_to_string(svg_path).map_err(|source| ConversionError::Read {
            path: svg_path.to_path_buf(),
            source,
        })?;

        let name = svg_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| svg_path.display().to_string());

        let (builder, report) = self.convert_str(&name, &content)?;
        builder.save(dxf_path)?;

        info!("Converted: {}", name);
        Ok(report)
    }
}

/// A file that failed during a batch run
#[derive(Debug)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub error: ConversionError,
}

/// Result of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub converted: Vec<FileReport>,
    pub failed: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Converts every `.svg` file in a directory
#[derive(Debug, Clone)]
pub struct BatchConverter {
    input_dir: PathBuf,
    output_dir: PathBuf,
    policy: FailurePolicy,
    converter: SvgToDxfConverter,
}

impl BatchConverter {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            policy: FailurePolicy::default(),
            converter: SvgToDxfConverter::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_options(mut self, options: ConversionOptions) -> Self {
        self.converter = SvgToDxfConverter::new(options);
        self
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Input SVG files in file-name order.
    pub fn discover_inputs(&self) -> ConversionResult<Vec<PathBuf>> {
        let directory_error = |source| ConversionError::Directory {
            path: self.input_dir.clone(),
            source,
        };

        let mut inputs = Vec::new();
        for entry in fs::read_dir(&self.input_dir).map_err(directory_error)? {
            let path = entry.map_err(directory_error)?.path();
            if path.is_file() && is_svg(&path) {
                inputs.push(path);
            }
        }
        inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(inputs)
    }

    /// Output path for an input file: same base name, `.dxf` extension.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
        name.push(".dxf");
        self.output_dir.join(name)
    }

    /// Convert every input file.
    ///
    /// The output directory is created before any file is processed. Under
    /// [`FailurePolicy::Abort`] the first failing file ends the run with its
    /// error; under [`FailurePolicy::Continue`] failures are collected in the
    /// summary.
    pub fn run(&self) -> ConversionResult<BatchSummary> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ConversionError::Directory {
            path: self.output_dir.clone(),
            source,
        })?;

        let inputs = self.discover_inputs()?;
        if inputs.is_empty() {
            warn!("No SVG files found in {}", self.input_dir.display());
        }

        let mut summary = BatchSummary::default();
        for input in inputs {
            let output = self.output_path(&input);
            match self.converter.convert_file(&input, &output) {
                Ok(report) => summary.converted.push(report),
                Err(err) => match self.policy {
                    FailurePolicy::Abort => return Err(err),
                    FailurePolicy::Continue => {
                        error!("Failed to convert {}: {}", input.display(), err);
                        summary.failed.push(BatchFailure { path: input, error: err });
                    }
                },
            }
        }

        Ok(summary)
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}
