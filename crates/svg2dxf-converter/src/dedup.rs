//! Consecutive point deduplication.
//!
//! Comparison is per axis, not Euclidean: a point is kept only when its x or y
//! distance from the last kept point exceeds the tolerance.

use svg2dxf_core::Point2;

/// Default per-axis tolerance in millimeters.
pub const DEDUP_TOLERANCE_MM: f64 = 0.01;

/// Minimum chain length that is worth emitting.
pub const MIN_CHAIN_POINTS: usize = 2;

/// Collapse consecutive points that differ by at most `tolerance` on both axes.
pub fn dedup_points(points: &[Point2], tolerance: f64) -> Vec<Point2> {
    let mut chain: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        match chain.last() {
            Some(last) if p.within_tolerance(last, tolerance) => {}
            _ => chain.push(p),
        }
    }
    chain
}

/// Deduplicate and drop chains too short to form a segment.
pub fn build_chain(points: &[Point2], tolerance: f64) -> Option<Vec<Point2>> {
    let chain = dedup_points(points, tolerance);
    (chain.len() >= MIN_CHAIN_POINTS).then_some(chain)
}
