//! DXF emission
//!
//! Every point chain becomes one open lightweight polyline on the default
//! layer. The drawing header declares millimeters as both the insertion unit
//! and the measurement system.

use crate::error::ExportResult;
use dxf::entities::{Entity, EntityType, LwPolyline};
use dxf::enums::{AcadVersion, DrawingUnits, Units};
use dxf::{Drawing, LwPolylineVertex};
use std::fmt;
use std::io::Write;
use std::path::Path;
use svg2dxf_core::Point2;

/// Accumulates polylines into a millimeter DXF drawing
pub struct DxfDocumentBuilder {
    drawing: Drawing,
    polylines: usize,
}

impl fmt::Debug for DxfDocumentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DxfDocumentBuilder")
            .field("version", &self.drawing.header.version)
            .field("polylines", &self.polylines)
            .finish()
    }
}

impl Default for DxfDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DxfDocumentBuilder {
    pub fn new() -> Self {
        let mut drawing = Drawing::new();
        drawing.header.version = AcadVersion::R2010;
        drawing.header.default_drawing_units = Units::Millimeters;
        drawing.header.drawing_units = DrawingUnits::Metric;
        Self {
            drawing,
            polylines: 0,
        }
    }

    /// Append an open polyline through `points`.
    ///
    /// Returns `false` and adds nothing when fewer than two points are given.
    pub fn add_polyline(&mut self, points: &[Point2]) -> bool {
        if points.len() < 2 {
            return false;
        }

        let mut polyline = LwPolyline::default();
        polyline.set_is_closed(false);
        polyline.vertices = points
            .iter()
            .map(|p| LwPolylineVertex {
                x: p.x,
                y: p.y,
                ..Default::default()
            })
            .collect();

        self.drawing
            .add_entity(Entity::new(EntityType::LwPolyline(polyline)));
        self.polylines += 1;
        true
    }

    pub fn polyline_count(&self) -> usize {
        self.polylines
    }

    /// Write the drawing to `path`, replacing any existing file.
    pub fn save(self, path: impl AsRef<Path>) -> ExportResult<()> {
        self.drawing.save_file(path.as_ref())?;
        Ok(())
    }

    /// Write the drawing as ASCII DXF to `writer`.
    pub fn write_to<W: Write>(self, writer: &mut W) -> ExportResult<()> {
        self.drawing.save(writer)?;
        Ok(())
    }
}
