//! Via stitching planner
//!
//! Plans where stitching vias can go inside a copper region, and which
//! existing vias a clear operation should remove. Plans are computed over an
//! immutable snapshot and never mutate the board.
//!
//! # Submodules
//! - `geometry` - Point, vector and bounding box math
//! - `clearance` - Outline clearance checks
//! - `overlap` - Candidate via vs. existing item collision
//! - `planner` - Lattice scan and removal selection
//! - `collab` - Capabilities borrowed from the host board
//! - `types` - Regions, items, requests and plans
//! - `error` - Planner errors

mod clearance;
mod collab;
mod error;
mod geometry;
mod overlap;
mod planner;
mod types;

pub use geometry::{point_segment_distance, BoundingBox, Point};

pub use error::{Result, StitchError};

pub use types::{
    Circle, ExistingItem, ItemId, LayerId, Pattern, PlacementRequest, PlacementResult, Region,
    RemovalMode, RemovalRequest, RemovalResult, StitchContext, ViaPlacement, ViaRecord,
    DEFAULT_GROUP_NAME,
};

pub use collab::{CandidateSource, FilledArea, NetLookup, TrackShape};

pub use clearance::is_clear;

pub use overlap::{overlaps, OverlapParams};

pub use planner::{plan_removal, Lattice, Planner};
