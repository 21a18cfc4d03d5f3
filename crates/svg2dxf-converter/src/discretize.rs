//! Curve discretization
//!
//! Turns a parametric curve into a chain of millimeter points. The number of
//! samples follows the curve's physical length at a fixed density, with a
//! floor of two so every curve yields at least a degenerate line. Samples are
//! uniform in the curve parameter, not in arc length.

use crate::curve::ParametricCurve;
use crate::error::{SamplingError, SamplingResult};
use svg2dxf_core::Point2;

/// Default sampling density in samples per millimeter of curve length.
pub const POINTS_PER_MM: f64 = 10.0;

/// Minimum number of samples per curve.
pub const MIN_SAMPLES: usize = 2;

/// Maximum number of samples per curve: one kilometer at the default density.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Raw sampling of one curve
#[derive(Debug, Clone, PartialEq)]
pub struct Discretization {
    /// Curve length in millimeters
    pub physical_length_mm: f64,
    /// Number of parameter intervals N; `points` holds N + 1 entries
    pub sample_count: usize,
    pub points: Vec<Point2>,
}

/// Samples curves at a fixed density
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discretizer {
    points_per_mm: f64,
}

impl Default for Discretizer {
    fn default() -> Self {
        Self::new(POINTS_PER_MM)
    }
}

impl Discretizer {
    pub fn new(points_per_mm: f64) -> Self {
        Self { points_per_mm }
    }

    /// Sample count for a curve of the given physical length.
    pub fn sample_count(&self, physical_length_mm: f64) -> usize {
        sample_count(physical_length_mm, self.points_per_mm)
    }

    /// Sample `curve` and map every point into millimeters.
    ///
    /// Fails when the physical length is not finite or would need more than
    /// [`MAX_SAMPLES`] samples.
    pub fn discretize<C: ParametricCurve + ?Sized>(
        &self,
        curve: &C,
        scale_factor: f64,
    ) -> SamplingResult<Discretization> {
        let physical_length_mm = curve.length() * scale_factor;
        if !physical_length_mm.is_finite() {
            return Err(SamplingError::NonFiniteLength(physical_length_mm));
        }

        let samples = (physical_length_mm * self.points_per_mm).floor();
        if samples > MAX_SAMPLES as f64 {
            return Err(SamplingError::TooManySamples {
                length_mm: physical_length_mm,
                samples,
                limit: MAX_SAMPLES,
            });
        }
        let n = self.sample_count(physical_length_mm);

        let points = (0..=n)
            .map(|i| {
                let t = i as f64 / n as f64;
                curve.point(t).scaled(scale_factor)
            })
            .collect();

        Ok(Discretization {
            physical_length_mm,
            sample_count: n,
            points,
        })
    }
}

/// `max(2, floor(length × density))`.
///
/// Non-finite or negative products fall back to the minimum.
pub fn sample_count(physical_length_mm: f64, points_per_mm: f64) -> usize {
    let raw = (physical_length_mm * points_per_mm).floor();
    if raw.is_nan() || raw < MIN_SAMPLES as f64 {
        MIN_SAMPLES
    } else {
        // `as` saturates for values beyond usize::MAX.
        raw as usize
    }
}
