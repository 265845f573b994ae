//! Error types for stitching plans

use thiserror::Error;

use super::geometry::Point;

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, StitchError>;

/// Errors that abort a planning call. An empty plan is not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StitchError {
    /// Malformed numeric input (non-positive spacing, drill >= via size, ...)
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Two coincident consecutive region corners
    #[error("Degenerate segment from ({}, {}) to ({}, {})", .start.x, .start.y, .end.x, .end.y)]
    DegenerateSegment { start: Point, end: Point },

    /// Region outline cannot bound an area
    #[error("Degenerate region: {0}")]
    DegenerateRegion(String),

    /// Board item the overlap detector cannot model
    #[error("Unsupported item kind: {0}")]
    UnsupportedItemKind(String),

    /// Region is a keep-out that forbids copper pour
    #[error("Region does not allow copper pour")]
    RegionNotPourable,

    #[error("Region is not on a copper layer: {0}")]
    NotCopperLayer(String),

    /// No zone id given and no zone selected
    #[error("No target zone")]
    NoTargetZone,

    #[error("Unknown net: {0}")]
    UnknownNet(String),
}

impl StitchError {
    /// Stable variant name, reported to clients alongside the message
    pub fn kind(&self) -> &'static str {
        match self {
            StitchError::InvalidParameters(_) => "InvalidParameters",
            StitchError::DegenerateSegment { .. } => "DegenerateSegment",
            StitchError::DegenerateRegion(_) => "DegenerateRegion",
            StitchError::UnsupportedItemKind(_) => "UnsupportedItemKind",
            StitchError::RegionNotPourable => "RegionNotPourable",
            StitchError::NotCopperLayer(_) => "NotCopperLayer",
            StitchError::NoTargetZone => "NoTargetZone",
            StitchError::UnknownNet(_) => "UnknownNet",
        }
    }
}
