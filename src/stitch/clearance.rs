//! Edge clearance checking against a region outline

use super::error::Result;
use super::geometry::{point_segment_distance, Point};

/// Check that `point` keeps at least `clearance` from every corner and edge
/// of the outline. Corners are walked in stored order and the last edge wraps
/// back to the first corner.
///
/// A corner closer than `clearance` fails, as does an edge at `clearance` or
/// closer. Fails with `DegenerateSegment` on coincident consecutive corners.
pub fn is_clear(point: Point, corners: &[Point], clearance: f64) -> Result<bool> {
    if corners.iter().any(|corner| point.distance(*corner) < clearance) {
        return Ok(false);
    }

    let n = corners.len();
    for i in 0..n {
        let (distance, _) = point_segment_distance(point, corners[i], corners[(i + 1) % n])?;
        if distance <= clearance {
            return Ok(false);
        }
    }

    Ok(true)
}
