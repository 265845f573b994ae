//! Poured copper hit testing
//!
//! Zone fills are triangulated once with earcut when the board is loaded and
//! hit tested triangle by triangle, with an AABB pre-filter.

use crate::stitch::{FilledArea, Point};

use super::types::{FilledPolygon, Zone};

/// Fill triangle with precomputed AABB for fast rejection
#[derive(Clone, Debug)]
pub struct Triangle {
    pub v0: Point,
    pub v1: Point,
    pub v2: Point,
    pub aabb_min: Point,
    pub aabb_max: Point,
}

impl Triangle {
    pub fn from_vertices(v0: Point, v1: Point, v2: Point) -> Self {
        Self {
            v0,
            v1,
            v2,
            aabb_min: Point::new(v0.x.min(v1.x).min(v2.x), v0.y.min(v1.y).min(v2.y)),
            aabb_max: Point::new(v0.x.max(v1.x).max(v2.x), v0.y.max(v1.y).max(v2.y)),
        }
    }

    /// Containment test, edges included
    pub fn contains(&self, p: Point) -> bool {
        let outside_box = p.x < self.aabb_min.x
            || p.x > self.aabb_max.x
            || p.y < self.aabb_min.y
            || p.y > self.aabb_max.y;
        !outside_box && point_in_triangle(p, self.v0, self.v1, self.v2)
    }
}

fn cross(u: Point, v: Point) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Check if a point is inside a triangle, edges included, either winding
///
/// Works on offsets from the vertices rather than absolute coordinates, so a
/// point on an edge tests as on the edge wherever the triangle sits on the board.
pub fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let area = cross(b - a, c - a);
    if area == 0.0 {
        return false; // Degenerate triangle
    }
    let d1 = cross(b - a, p - a);
    let d2 = cross(c - b, p - b);
    let d3 = cross(a - c, p - c);
    if area > 0.0 {
        d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
    } else {
        d1 <= 0.0 && d2 <= 0.0 && d3 <= 0.0
    }
}
