//! Track and arc collision against via circles

use std::f64::consts::TAU;

use crate::stitch::{point_segment_distance, BoundingBox, Circle, Point, TrackShape};

use super::types::{ArcTrack, Segment};

/// Distance from `p` to a segment; a zero-length segment is a dot
fn distance_to_segment(p: Point, start: Point, end: Point) -> f64 {
    match point_segment_distance(p, start, end) {
        Ok((d, _)) => d,
        Err(_) => p.distance(start),
    }
}

impl Segment {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
        .expanded(self.width / 2.0)
    }
}

impl TrackShape for Segment {
    fn collides(&self, via: &Circle, clearance: f64) -> bool {
        let d = distance_to_segment(via.center, self.start, self.end);
        d < self.width / 2.0 + via.radius + clearance
    }
}

/// Circle through three points, `None` when they are collinear
fn circumcircle(a: Point, b: Point, c: Point) -> Option<(Point, f64)> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-12 {
        return None;
    }
    let a2 = a.dot(a);
    let b2 = b.dot(b);
    let c2 = c.dot(c);
    let center = Point::new(
        (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
        (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
    );
    Some((center, center.distance(a)))
}

fn angle_of(center: Point, p: Point) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

/// Counter-clockwise angle from `from` to `to`, in [0, 2π)
fn ccw_sweep(from: f64, to: f64) -> f64 {
    (to - from).rem_euclid(TAU)
}

impl ArcTrack {
    /// Centre line distance from `p` to the arc
    pub fn distance_to(&self, p: Point) -> f64 {
        let Some((center, radius)) = circumcircle(self.start, self.mid, self.end) else {
            return distance_to_segment(p, self.start, self.end);
        };

        let a_start = angle_of(center, self.start);
        let sweep = ccw_sweep(a_start, angle_of(center, self.end));
        let mid_offset = ccw_sweep(a_start, angle_of(center, self.mid));

        // Normalise to a counter-clockwise sweep from `base` of `extent`
        let (base, extent) = if mid_offset <= sweep {
            (a_start, sweep)
        } else {
            (angle_of(center, self.end), TAU - sweep)
        };

        if ccw_sweep(base, angle_of(center, p)) <= extent {
            (p.distance(center) - radius).abs()
        } else {
            p.distance(self.start).min(p.distance(self.end))
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let points = [self.start, self.mid, self.end];
        let chord_box = BoundingBox::from_points(&points)
            .unwrap_or_else(|| BoundingBox::around(self.start, 0.0));
        // The full circle box is a safe superset when the arc bulges past its points
        let bbox = match circumcircle(self.start, self.mid, self.end) {
            Some((center, radius)) => {
                let circle_box = BoundingBox::around(center, radius * 2.0);
                if self.spans_quadrant_extreme(center) {
                    circle_box
                } else {
                    chord_box
                }
            }
            None => chord_box,
        };
        bbox.expanded(self.width / 2.0)
    }

    /// True if the arc passes through the leftmost, rightmost, top or bottom
    /// point of its circle
    fn spans_quadrant_extreme(&self, center: Point) -> bool {
        let a_start = angle_of(center, self.start);
        let sweep = ccw_sweep(a_start, angle_of(center, self.end));
        let mid_offset = ccw_sweep(a_start, angle_of(center, self.mid));
        let (base, extent) = if mid_offset <= sweep {
            (a_start, sweep)
        } else {
            (angle_of(center, self.end), TAU - sweep)
        };
        [0.0, TAU / 4.0, TAU / 2.0, 3.0 * TAU / 4.0]
            .iter()
            .any(|&a| ccw_sweep(base, a) <= extent)
    }
}

impl TrackShape for ArcTrack {
    fn collides(&self, via: &Circle, clearance: f64) -> bool {
        self.distance_to(via.center) < self.width / 2.0 + via.radius + clearance
    }
}
