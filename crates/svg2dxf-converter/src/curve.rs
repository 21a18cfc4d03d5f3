//! Parametric curves
//!
//! A curve answers two questions: how long it is, and where it is at a
//! parameter `t` in `[0, 1]`. Both answers are in the document's viewbox
//! user units. Evaluation and measurement are delegated to `lyon::geom`:
//! lengths are exact for lines, closed-form for quadratics and flattened for
//! cubics and elliptical arcs, with a tolerance of [`LENGTH_TOLERANCE`] times
//! the segment's size.

use lyon::geom::{Arc, CubicBezierSegment, LineSegment, QuadraticBezierSegment};
use svg2dxf_core::Point2;

/// Flattening tolerance for approximated lengths, relative to the segment's
/// size and never below this value in user units.
pub const LENGTH_TOLERANCE: f64 = 1e-7;

/// Tolerance for a segment whose control polygon or radius is `size` long.
///
/// `None` when the size overflows; the flattening step count would be
/// unbounded.
fn flattening_tolerance(size: f64) -> Option<f64> {
    let tolerance = LENGTH_TOLERANCE * size.max(1.0);
    tolerance.is_finite().then_some(tolerance)
}

/// A curve that can be measured and sampled.
pub trait ParametricCurve {
    /// Total arc length in user units.
    fn length(&self) -> f64;

    /// Point at parameter `t`, clamped to `[0, 1]`.
    fn point(&self, t: f64) -> Point2;
}

/// One drawing primitive of a path, in absolute user coordinates.
#[derive(Debug, Clone, Copy)]
pub enum Segment {
    Line(LineSegment<f64>),
    Quadratic(QuadraticBezierSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
    Arc(Arc<f64>),
}

impl Segment {
    pub fn line(from: Point2, to: Point2) -> Self {
        Self::Line(LineSegment {
            from: to_lyon(from),
            to: to_lyon(to),
        })
    }

    pub fn quadratic(from: Point2, ctrl: Point2, to: Point2) -> Self {
        Self::Quadratic(QuadraticBezierSegment {
            from: to_lyon(from),
            ctrl: to_lyon(ctrl),
            to: to_lyon(to),
        })
    }

    pub fn cubic(from: Point2, ctrl1: Point2, ctrl2: Point2, to: Point2) -> Self {
        Self::Cubic(CubicBezierSegment {
            from: to_lyon(from),
            ctrl1: to_lyon(ctrl1),
            ctrl2: to_lyon(ctrl2),
            to: to_lyon(to),
        })
    }

    pub fn start(&self) -> Point2 {
        self.point(0.0)
    }

    pub fn end(&self) -> Point2 {
        self.point(1.0)
    }
}

impl ParametricCurve for Segment {
    fn length(&self) -> f64 {
        match self {
            Self::Line(line) => line.length(),
            Self::Quadratic(quad) => quad.length(),
            Self::Cubic(cubic) => {
                let hull = (cubic.ctrl1 - cubic.from).length()
                    + (cubic.ctrl2 - cubic.ctrl1).length()
                    + (cubic.to - cubic.ctrl2).length();
                flattening_tolerance(hull)
                    .map_or(f64::INFINITY, |tolerance| cubic.approximate_length(tolerance))
            }
            Self::Arc(arc) => {
                let radius = arc.radii.x.abs().max(arc.radii.y.abs());
                flattening_tolerance(radius)
                    .map_or(f64::INFINITY, |tolerance| arc.approximate_length(tolerance))
            }
        }
    }

    fn point(&self, t: f64) -> Point2 {
        let t = t.clamp(0.0, 1.0);
        let p = match self {
            Self::Line(line) => line.sample(t),
            Self::Quadratic(quad) => quad.sample(t),
            Self::Cubic(cubic) => cubic.sample(t),
            Self::Arc(arc) => arc.sample(t),
        };
        from_lyon(p)
    }
}

/// A connected sequence of segments sampled as one curve.
///
/// The global parameter is distributed over segments in proportion to their
/// lengths, so `point(0.5)` lands halfway along the path rather than halfway
/// through the segment list.
#[derive(Debug, Clone)]
pub struct PathCurve {
    segments: Vec<Segment>,
    closed: bool,
    lengths: Vec<f64>,
    total_length: f64,
}

impl PathCurve {
    pub fn new(segments: Vec<Segment>, closed: bool) -> Self {
        let lengths: Vec<f64> = segments.iter().map(ParametricCurve::length).collect();
        let total_length = lengths.iter().sum();
        Self {
            segments,
            closed,
            lengths,
            total_length,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Map a global parameter to `(segment index, local parameter)`.
    fn locate(&self, t: f64) -> Option<(usize, f64)> {
        let last = self.segments.len().checked_sub(1)?;
        if t <= 0.0 {
            return Some((0, 0.0));
        }
        if t >= 1.0 {
            return Some((last, 1.0));
        }

        if self.total_length > 0.0 {
            let mut t0 = 0.0;
            for (idx, length) in self.lengths.iter().enumerate() {
                let fraction = length / self.total_length;
                if fraction <= 0.0 {
                    continue;
                }
                let t1 = t0 + fraction;
                if t1 >= t {
                    return Some((idx, ((t - t0) / fraction).clamp(0.0, 1.0)));
                }
                t0 = t1;
            }
            Some((last, 1.0))
        } else {
            let scaled = t * self.segments.len() as f64;
            let idx = (scaled.floor() as usize).min(last);
            Some((idx, scaled - idx as f64))
        }
    }
}

impl ParametricCurve for PathCurve {
    fn length(&self) -> f64 {
        self.total_length
    }

    fn point(&self, t: f64) -> Point2 {
        match self.locate(t) {
            Some((idx, local)) => self.segments[idx].point(local),
            None => Point2::default(),
        }
    }
}

pub(crate) fn to_lyon(p: Point2) -> lyon::geom::Point<f64> {
    lyon::geom::point(p.x, p.y)
}

pub(crate) fn from_lyon(p: lyon::geom::Point<f64>) -> Point2 {
    Point2::new(p.x, p.y)
}
