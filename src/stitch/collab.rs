//! Capabilities the planner borrows from the host board model
//!
//! The planner never touches a concrete board. Filled-copper hit tests, shape
//! collision, candidate collection and net lookup are injected through these
//! traits so tests can drive the planner with deterministic stubs.

use super::error::Result;
use super::geometry::{BoundingBox, Point};
use super::types::{Circle, ExistingItem};

/// Filled (poured) copper of a zone
pub trait FilledArea {
    /// True if `point` lies inside the filled copper of this area on `layer`
    fn contains_filled(&self, layer: &str, point: Point) -> bool;
}

/// Clearance-aware collision for track and arc shapes
pub trait TrackShape {
    /// True if this shape comes closer than `clearance` to `via`
    fn collides(&self, via: &Circle, clearance: f64) -> bool;
}

/// Spatial pre-filter over the live board
pub trait CandidateSource {
    /// Every pad, track, arc and via whose bounding box intersects `bounds`,
    /// plus zones on a net other than `region_net`. A conservative superset.
    fn collect_candidate_items(
        &self,
        bounds: &BoundingBox,
        region_net: Option<&str>,
    ) -> Result<Vec<ExistingItem<'_>>>;
}

/// Net name to net code resolution
pub trait NetLookup {
    fn net_code(&self, name: &str) -> Option<i32>;
}

/// Closures stand in for filled areas in stubs and tests
impl<F> FilledArea for F
where
    F: Fn(&str, Point) -> bool,
{
    fn contains_filled(&self, layer: &str, point: Point) -> bool {
        self(layer, point)
    }
}
