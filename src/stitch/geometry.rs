//! Point, vector and bounding box math for the stitching planner
//!
//! Everything here is pure. Distances are in board units (nanometres).

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use super::error::StitchError;

/// A 2D point (also used as a vector)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when treated as a vector
    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(self, other: Point) -> f64 {
        (self - other).norm()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;
    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// Point-to-segment minimum distance
///
/// Projects `p - start` onto the unit vector of the segment and clamps the
/// scalar projection to `[0, 1]`, so the nearest point always lies on the
/// segment. Returns the distance and the nearest point.
pub fn point_segment_distance(
    p: Point,
    start: Point,
    end: Point,
) -> Result<(f64, Point), StitchError> {
    let line_vec = end - start;
    let line_len = line_vec.norm();
    if line_len == 0.0 {
        return Err(StitchError::DegenerateSegment { start, end });
    }

    let unit = line_vec / line_len;
    let t = (unit.dot(p - start) / line_len).clamp(0.0, 1.0);
    let nearest = start + line_vec * t;

    Ok((p.distance(nearest), nearest))
}

/// Axis-aligned bounding box. Board Y grows downward, so `min_y` is the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Square box of side `size` centred on `center`
    pub fn around(center: Point, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, center.x + half, center.y + half)
    }

    /// Smallest box containing every point, `None` for an empty slice
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self::new(first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        Some(bbox)
    }

    pub fn left(&self) -> f64 {
        self.min_x
    }

    pub fn right(&self) -> f64 {
        self.max_x
    }

    pub fn top(&self) -> f64 {
        self.min_y
    }

    pub fn bottom(&self) -> f64 {
        self.max_y
    }

    /// Closed intersection test: boxes sharing an edge intersect
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    pub fn expanded(&self, margin: f64) -> Self {
        Self::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }

    pub fn union(&self, other: &BoundingBox) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_segment_distance_perpendicular() {
        let (d, nearest) = point_segment_distance(
            Point::new(1000.0, 500.0),
            Point::new(0.0, 0.0),
            Point::new(2000.0, 0.0),
        )
        .unwrap();
        assert!((d - 500.0).abs() < 1e-9);
        assert_eq!(nearest, Point::new(1000.0, 0.0));
    }

    #[test]
    fn test_point_segment_distance_clamps_to_endpoint() {
        // Beyond the end: nearest point is the endpoint, not the line extension
        let (d, nearest) =
            point_segment_distance(Point::new(5.0, 4.0), Point::new(0.0, 0.0), Point::new(2.0, 0.0))
                .unwrap();
        assert_eq!(nearest, Point::new(2.0, 0.0));
        assert!((d - 5.0).abs() < 1e-9);

        let (d, nearest) = point_segment_distance(
            Point::new(-3.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
        )
        .unwrap();
        assert_eq!(nearest, Point::new(0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_segment_distance_vertical_edge() {
        let (d, _) = point_segment_distance(
            Point::new(3.0, 5.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
        )
        .unwrap();
        assert!((d - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_segment_rejected() {
        let p = Point::new(1.0, 1.0);
        let result = point_segment_distance(Point::new(0.0, 0.0), p, p);
        assert!(matches!(result, Err(StitchError::DegenerateSegment { .. })));
    }

    #[test]
    fn test_bounding_box_intersects_touching() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(10.0, 0.0, 20.0, 10.0);
        let c = BoundingBox::new(10.5, 0.0, 20.0, 10.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_bounding_box_from_points() {
        let bbox = BoundingBox::from_points(&[
            Point::new(3.0, -1.0),
            Point::new(-2.0, 4.0),
            Point::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(bbox, BoundingBox::new(-2.0, -1.0, 3.0, 4.0));
        assert!(BoundingBox::from_points(&[]).is_none());
    }
}
