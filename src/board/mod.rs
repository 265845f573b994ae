//! Board model hosting the stitching planner
//!
//! Loads a board snapshot from JSON and provides the capabilities the planner
//! borrows: poured copper hit tests, track shape collision, R-tree candidate
//! collection and net lookup. Also applies finished plans back to the board.
//!
//! # Submodules
//! - `types` - Board, zones, tracks, vias, footprints
//! - `fill` - Earcut triangulation of zone fills
//! - `shapes` - Segment and arc collision
//! - `spatial` - R-tree index and candidate collection
//! - `apply` - Region selection and plan application
//! - `io` - JSON load/save

mod apply;
mod fill;
mod io;
mod shapes;
mod spatial;
mod types;

pub use types::{
    ArcTrack, Board, DesignSettings, FilledPolygon, Footprint, Layer, Pad, Segment, TrackEntry,
    TrackItem, UnknownItem, Via, Zone, NM_PER_MM,
};

pub use fill::{point_in_triangle, triangulate, Triangle};
