//! # SVG Import Module
//!
//! Reads an SVG document into parametric curves plus the root element's
//! declared metadata.
//!
//! Supports:
//! - `path` elements (all SVG path commands, relative and absolute)
//! - `polyline`, `polygon`, `line` and `rect` elements
//! - `circle` and `ellipse` elements (as two elliptical arcs)
//!
//! Every subpath becomes its own curve. Transforms, styles and non-path
//! primitives (text, images) are ignored.

use crate::curve::{to_lyon, PathCurve, Segment};
use crate::error::{ImportError, ImportResult};
use lyon::geom::{Angle, ArcFlags, SvgArc};
use std::collections::BTreeMap;
use svg2dxf_core::Point2;
use svgtypes::{PathParser, PathSegment};
use tracing::{debug, warn};

/// String-keyed attribute map of one element.
pub type Attributes = BTreeMap<String, String>;

/// Result of reading one SVG document
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    /// One curve per drawable subpath, in document order
    pub curves: Vec<PathCurve>,
    /// Attributes of the element each curve came from (parallel to `curves`)
    pub attributes: Vec<Attributes>,
    /// Attributes of the root `<svg>` element
    pub svg_attributes: Attributes,
}

impl ParsedDocument {
    /// Root attribute lookup, `None` when absent.
    pub fn svg_attribute(&self, name: &str) -> Option<&str> {
        self.svg_attributes.get(name).map(String::as_str)
    }
}

/// SVG importer producing [`ParsedDocument`]s
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgImporter;

impl SvgImporter {
    pub fn new() -> Self {
        Self
    }

    /// Import SVG from string content
    pub fn import_string(&self, svg_content: &str) -> ImportResult<ParsedDocument> {
        let xml = roxmltree::Document::parse(svg_content)?;
        let root = xml.root_element();
        if root.tag_name().name() != "svg" {
            return Err(ImportError::NotSvg(root.tag_name().name().to_string()));
        }

        let mut document = ParsedDocument {
            svg_attributes: collect_attributes(root),
            ..Default::default()
        };

        for node in root.descendants().filter(|n| n.is_element()) {
            let name = node.tag_name().name();
            let subpaths = match name {
                "path" => match node.attribute("d") {
                    Some(d) => parse_path_data(d).map_err(|reason| ImportError::PathData {
                        element: element_label(node),
                        reason,
                    })?,
                    None => Vec::new(),
                },
                "polyline" => points_to_subpaths(node.attribute("points"), false),
                "polygon" => points_to_subpaths(node.attribute("points"), true),
                "line" => line_to_subpaths(node),
                "rect" => rect_to_subpaths(node),
                "circle" => {
                    let r = number_attr(node, "r");
                    ellipse_to_subpaths(number_attr(node, "cx"), number_attr(node, "cy"), r, r)
                }
                "ellipse" => ellipse_to_subpaths(
                    number_attr(node, "cx"),
                    number_attr(node, "cy"),
                    number_attr(node, "rx"),
                    number_attr(node, "ry"),
                ),
                _ => continue,
            };

            if subpaths.is_empty() {
                debug!("Skipping <{}> without drawable geometry", element_label(node));
                continue;
            }

            let attributes = collect_attributes(node);
            for (segments, closed) in subpaths {
                document.curves.push(PathCurve::new(segments, closed));
                document.attributes.push(attributes.clone());
            }
        }

        debug!(
            "Imported {} curve(s) from SVG with {} root attribute(s)",
            document.curves.len(),
            document.svg_attributes.len()
        );

        Ok(document)
    }
}

type Subpath = (Vec<Segment>, bool);

fn collect_attributes(node: roxmltree::Node<'_, '_>) -> Attributes {
    node.attributes()
        .map(|attr| (attr.name().to_string(), attr.value().to_string()))
        .collect()
}

fn element_label(node: roxmltree::Node<'_, '_>) -> String {
    match node.attribute("id") {
        Some(id) => format!("{} id=\"{}\"", node.tag_name().name(), id),
        None => node.tag_name().name().to_string(),
    }
}

fn number_attr(node: roxmltree::Node<'_, '_>, name: &str) -> f64 {
    node.attribute(name)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Collects segments for one subpath and tracks pen state.
#[derive(Default)]
struct SubpathBuilder {
    finished: Vec<Subpath>,
    segments: Vec<Segment>,
    start: Point2,
    current: Point2,
}

impl SubpathBuilder {
    fn move_to(&mut self, p: Point2) {
        self.flush(false);
        self.start = p;
        self.current = p;
    }

    fn push(&mut self, segment: Segment, to: Point2) {
        self.segments.push(segment);
        self.current = to;
    }

    fn line_to(&mut self, to: Point2) {
        self.push(Segment::line(self.current, to), to);
    }

    fn close(&mut self) {
        if self.current != self.start {
            self.line_to(self.start);
        }
        self.flush(true);
        self.current = self.start;
    }

    fn flush(&mut self, closed: bool) {
        if !self.segments.is_empty() {
            self.finished.push((std::mem::take(&mut self.segments), closed));
        }
    }

    fn finish(mut self) -> Vec<Subpath> {
        self.flush(false);
        self.finished
    }
}

/// Parse SVG path data into absolute subpaths.
pub fn parse_path_data(d: &str) -> Result<Vec<(Vec<Segment>, bool)>, String> {
    let mut builder = SubpathBuilder::default();
    // Reflection sources for S/s and T/t.
    let mut last_cubic_ctrl: Option<Point2> = None;
    let mut last_quad_ctrl: Option<Point2> = None;

    for segment in PathParser::from(d) {
        let segment = segment.map_err(|err| err.to_string())?;
        let cur = builder.current;
        let abs_point = |abs: bool, x: f64, y: f64| {
            if abs {
                Point2::new(x, y)
            } else {
                Point2::new(cur.x + x, cur.y + y)
            }
        };

        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;

        match segment {
            PathSegment::MoveTo { abs, x, y } => {
                builder.move_to(abs_point(abs, x, y));
            }
            PathSegment::LineTo { abs, x, y } => {
                builder.line_to(abs_point(abs, x, y));
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                let to = if abs {
                    Point2::new(x, cur.y)
                } else {
                    Point2::new(cur.x + x, cur.y)
                };
                builder.line_to(to);
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let to = if abs {
                    Point2::new(cur.x, y)
                } else {
                    Point2::new(cur.x, cur.y + y)
                };
                builder.line_to(to);
            }
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let ctrl1 = abs_point(abs, x1, y1);
                let ctrl2 = abs_point(abs, x2, y2);
                let to = abs_point(abs, x, y);
                builder.push(Segment::cubic(cur, ctrl1, ctrl2, to), to);
                cubic_ctrl = Some(ctrl2);
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let ctrl1 = reflect(last_cubic_ctrl, cur);
                let ctrl2 = abs_point(abs, x2, y2);
                let to = abs_point(abs, x, y);
                builder.push(Segment::cubic(cur, ctrl1, ctrl2, to), to);
                cubic_ctrl = Some(ctrl2);
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                let ctrl = abs_point(abs, x1, y1);
                let to = abs_point(abs, x, y);
                builder.push(Segment::quadratic(cur, ctrl, to), to);
                quad_ctrl = Some(ctrl);
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                let ctrl = reflect(last_quad_ctrl, cur);
                let to = abs_point(abs, x, y);
                builder.push(Segment::quadratic(cur, ctrl, to), to);
                quad_ctrl = Some(ctrl);
            }
            PathSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let to = abs_point(abs, x, y);
                if let Some(segment) = arc_segment(cur, to, rx, ry, x_axis_rotation, large_arc, sweep)
                {
                    builder.push(segment, to);
                }
            }
            PathSegment::ClosePath { .. } => {
                builder.close();
            }
        }

        last_cubic_ctrl = cubic_ctrl;
        last_quad_ctrl = quad_ctrl;
    }

    Ok(builder.finish())
}

/// Reflect the previous control point about the current point, or use the
/// current point when the previous command was not of the same kind.
fn reflect(prev_ctrl: Option<Point2>, current: Point2) -> Point2 {
    match prev_ctrl {
        Some(ctrl) => Point2::new(2.0 * current.x - ctrl.x, 2.0 * current.y - ctrl.y),
        None => current,
    }
}

/// Elliptical arc from endpoint parameterization.
///
/// Identical endpoints omit the arc; a zero radius degrades it to a line.
fn arc_segment(
    from: Point2,
    to: Point2,
    rx: f64,
    ry: f64,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> Option<Segment> {
    if from == to {
        return None;
    }

    let svg_arc = SvgArc {
        from: to_lyon(from),
        to: to_lyon(to),
        radii: lyon::geom::vector(rx.abs(), ry.abs()),
        x_rotation: Angle::degrees(x_axis_rotation),
        flags: ArcFlags { large_arc, sweep },
    };

    if svg_arc.is_straight_line() {
        return Some(Segment::line(from, to));
    }

    Some(Segment::Arc(svg_arc.to_arc()))
}

fn parse_number_list(value: &str) -> Vec<f64> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map_while(|s| s.parse::<f64>().ok())
        .collect()
}

fn points_to_subpaths(points: Option<&str>, closed: bool) -> Vec<Subpath> {
    let Some(points) = points else {
        return Vec::new();
    };

    let numbers = parse_number_list(points);
    if numbers.len() % 2 != 0 {
        warn!("Odd number of coordinates in points list, ignoring the last one");
    }
    let vertices: Vec<Point2> = numbers
        .chunks_exact(2)
        .map(|pair| Point2::new(pair[0], pair[1]))
        .collect();

    polyline_subpaths(&vertices, closed)
}

fn polyline_subpaths(vertices: &[Point2], closed: bool) -> Vec<Subpath> {
    let Some((&first, rest)) = vertices.split_first() else {
        return Vec::new();
    };

    let mut builder = SubpathBuilder::default();
    builder.move_to(first);
    for &vertex in rest {
        builder.line_to(vertex);
    }
    if closed {
        builder.close();
    }
    builder.finish()
}

fn line_to_subpaths(node: roxmltree::Node<'_, '_>) -> Vec<Subpath> {
    let from = Point2::new(number_attr(node, "x1"), number_attr(node, "y1"));
    let to = Point2::new(number_attr(node, "x2"), number_attr(node, "y2"));
    vec![(vec![Segment::line(from, to)], false)]
}

fn rect_to_subpaths(node: roxmltree::Node<'_, '_>) -> Vec<Subpath> {
    let x = number_attr(node, "x");
    let y = number_attr(node, "y");
    let width = number_attr(node, "width");
    let height = number_attr(node, "height");
    if width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }

    let corners = [
        Point2::new(x, y),
        Point2::new(x + width, y),
        Point2::new(x + width, y + height),
        Point2::new(x, y + height),
    ];
    polyline_subpaths(&corners, true)
}

fn ellipse_to_subpaths(cx: f64, cy: f64, rx: f64, ry: f64) -> Vec<Subpath> {
    if rx <= 0.0 || ry <= 0.0 {
        return Vec::new();
    }

    let left = Point2::new(cx - rx, cy);
    let right = Point2::new(cx + rx, cy);
    let halves = [
        arc_segment(left, right, rx, ry, 0.0, true, false),
        arc_segment(right, left, rx, ry, 0.0, true, false),
    ];

    let segments: Vec<Segment> = halves.into_iter().flatten().collect();
    vec![(segments, true)]
}
