//! Declared document metadata and the scale factor derived from it.
//!
//! The scale factor maps viewbox user units to millimeters and is the same
//! on both axes: declared width divided by viewbox width. The declared height
//! is resolved and reported, but never used for scaling.

use crate::error::{MetadataError, MetadataResult};
use crate::import::ParsedDocument;
use std::str::FromStr;
use svg2dxf_core::{Length, MetadataDefaults};

/// The `viewBox` rectangle in user units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }
}

impl FromStr for ViewBox {
    type Err = MetadataError;

    fn from_str(s: &str) -> MetadataResult<Self> {
        let invalid = |reason: String| MetadataError::InvalidViewBox {
            value: s.to_string(),
            reason,
        };

        let fields: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|f| !f.is_empty())
            .collect();
        if fields.len() != 4 {
            return Err(invalid(format!("expected 4 numbers, found {}", fields.len())));
        }

        let mut numbers = [0.0f64; 4];
        for (slot, field) in numbers.iter_mut().zip(&fields) {
            *slot = field
                .parse()
                .map_err(|_| invalid(format!("'{}' is not a number", field)))?;
        }

        let [min_x, min_y, width, height] = numbers;
        if !width.is_finite() || width <= 0.0 {
            return Err(invalid("width must be finite and > 0".to_string()));
        }

        Ok(Self::new(min_x, min_y, width, height))
    }
}

/// Declared dimensions and the derived scale factor of one document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMetadata {
    /// Declared width in millimeters
    pub width_mm: f64,
    /// Declared height in millimeters
    pub height_mm: f64,
    pub view_box: ViewBox,
    /// Millimeters per viewbox user unit
    pub scale_factor: f64,
}

/// Resolves declared metadata, substituting defaults for absent values
#[derive(Debug, Clone, Default)]
pub struct MetadataResolver {
    defaults: MetadataDefaults,
}

impl MetadataResolver {
    pub fn new(defaults: MetadataDefaults) -> Self {
        Self { defaults }
    }

    /// Resolve metadata from a parsed document's root attributes.
    pub fn resolve_document(&self, document: &ParsedDocument) -> MetadataResult<ResolvedMetadata> {
        self.resolve(
            document.svg_attribute("width"),
            document.svg_attribute("height"),
            document.svg_attribute("viewBox"),
        )
    }

    /// Resolve metadata from raw attribute values.
    pub fn resolve(
        &self,
        width: Option<&str>,
        height: Option<&str>,
        view_box: Option<&str>,
    ) -> MetadataResult<ResolvedMetadata> {
        let width_mm = parse_length("width", width.unwrap_or(self.defaults.width.as_str()))?;
        let height_mm = parse_length("height", height.unwrap_or(self.defaults.height.as_str()))?;
        let view_box: ViewBox = view_box.unwrap_or(self.defaults.view_box.as_str()).parse()?;

        if !width_mm.is_finite() || width_mm <= 0.0 {
            return Err(MetadataError::InvalidDimension {
                attribute: "width",
                value: width_mm,
            });
        }

        Ok(ResolvedMetadata {
            width_mm,
            height_mm,
            view_box,
            scale_factor: scale_factor(width_mm, view_box.width),
        })
    }
}

/// Millimeters per user unit: declared width over viewbox width.
pub fn scale_factor(width_mm: f64, view_box_width: f64) -> f64 {
    width_mm / view_box_width
}

fn parse_length(attribute: &'static str, value: &str) -> MetadataResult<f64> {
    value
        .parse::<Length>()
        .map(|length| length.to_mm())
        .map_err(|source| MetadataError::InvalidLength {
            attribute,
            value: value.to_string(),
            source,
        })
}
