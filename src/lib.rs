//! Via stitching: plan and apply lattices of stitching vias inside copper zones
//!
//! - `stitch` - the planning engine: lattice scan, clearance and overlap checks,
//!   removal selection
//! - `board` - JSON board model supplying filled areas, candidate items and nets
//! - `server` - JSON-RPC front end over stdin/stdout

pub mod board;
pub mod server;
pub mod stitch;

pub use board::Board;
pub use stitch::{
    plan_removal, Pattern, PlacementRequest, PlacementResult, Planner, RemovalMode, RemovalRequest,
    RemovalResult, StitchContext, StitchError,
};
