//! Stitching data types
//!
//! Regions, candidate items, requests and plans. Requests and plans are
//! serde types so they can cross the JSON-RPC boundary unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::collab::{FilledArea, TrackShape};
use super::error::{Result, StitchError};
use super::geometry::{BoundingBox, Point};

/// Board object identifier
pub type ItemId = u64;

/// Copper layer name, e.g. "F.Cu"
pub type LayerId = String;

/// Group name stitched vias are tagged with
pub const DEFAULT_GROUP_NAME: &str = "VIA_STITCHING_GROUP";

/// Target region to stitch
pub struct Region<'a> {
    /// Outline corners in winding order; the last corner connects to the first
    pub corners: Vec<Point>,
    pub net: Option<String>,
    /// Layers the region spans. The first entry is the primary layer.
    pub layers: Vec<LayerId>,
    pub allows_copper_pour: bool,
    pub area: &'a dyn FilledArea,
}

impl<'a> Region<'a> {
    pub fn primary_layer(&self) -> Option<&str> {
        self.layers.first().map(String::as_str)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.corners)
    }

    /// True if `point` is in the filled copper on every layer of the region
    pub fn contains_filled_on_all_layers(&self, point: Point) -> bool {
        self.layers
            .iter()
            .all(|layer| self.area.contains_filled(layer, point))
    }

    /// Reject outlines that cannot bound an area
    pub fn validate(&self) -> Result<()> {
        if self.corners.len() < 3 {
            return Err(StitchError::DegenerateRegion(format!(
                "outline has {} corners, at least 3 required",
                self.corners.len()
            )));
        }
        if self.layers.is_empty() {
            return Err(StitchError::DegenerateRegion("region spans no layers".to_string()));
        }
        if let Some(p) = self.corners.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(StitchError::DegenerateRegion(format!(
                "corner ({}, {}) is not finite",
                p.x, p.y
            )));
        }

        let n = self.corners.len();
        for i in 0..n {
            let start = self.corners[i];
            let end = self.corners[(i + 1) % n];
            if start == end {
                return Err(StitchError::DegenerateSegment { start, end });
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Region<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("corners", &self.corners)
            .field("net", &self.net)
            .field("layers", &self.layers)
            .field("allows_copper_pour", &self.allows_copper_pour)
            .finish_non_exhaustive()
    }
}

/// Circular footprint of a via, used for shape collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

/// Snapshot of an existing via
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViaRecord {
    pub id: ItemId,
    pub position: Point,
    pub width: f64,
    pub drill: f64,
    pub net: Option<String>,
    pub group: Option<String>,
}

impl ViaRecord {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::around(self.position, self.width)
    }
}

/// A board item close enough to the region to need an exact overlap check
pub enum ExistingItem<'a> {
    Pad { bounds: BoundingBox },
    Track {
        shape: &'a dyn TrackShape,
        is_arc: bool,
    },
    Via(ViaRecord),
    /// `layer` is the zone's own layer, kept for diagnostics. Overlap checks
    /// probe `area` on the region's layer instead.
    Zone {
        net: Option<String>,
        layer: LayerId,
        area: &'a dyn FilledArea,
    },
}

impl fmt::Debug for ExistingItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExistingItem::Pad { bounds } => f.debug_struct("Pad").field("bounds", bounds).finish(),
            ExistingItem::Track { is_arc, .. } => {
                f.debug_struct("Track").field("is_arc", is_arc).finish_non_exhaustive()
            }
            ExistingItem::Via(via) => f.debug_tuple("Via").field(via).finish(),
            ExistingItem::Zone { net, layer, .. } => f
                .debug_struct("Zone")
                .field("net", net)
                .field("layer", layer)
                .finish_non_exhaustive(),
        }
    }
}

/// Lattice used to enumerate candidate positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pattern {
    #[default]
    Grid,
    /// Alternate rows shifted by half the column spacing
    Star,
}

/// Which existing vias a removal plan selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RemovalMode {
    /// Vias tagged with the stitching group, whatever their size or net
    #[default]
    GroupOnly,
    /// Vias in the region's filled copper matching drill, width and net exactly
    AttributeMatch,
}

/// Parameters for a fill plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub via_size: f64,
    pub drill_size: f64,
    pub spacing_x: f64,
    pub spacing_y: f64,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
    /// Minimum distance from the region outline, 0 disables the check
    #[serde(default)]
    pub edge_clearance: f64,
    #[serde(default)]
    pub track_clearance: f64,
    /// Net given to new vias
    #[serde(default)]
    pub net: Option<String>,
    /// Layers given to new vias, defaults to the region's layer set
    #[serde(default)]
    pub layers: Option<Vec<LayerId>>,
    #[serde(default)]
    pub pattern: Pattern,
}

impl PlacementRequest {
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("via_size", self.via_size),
            ("drill_size", self.drill_size),
            ("spacing_x", self.spacing_x),
            ("spacing_y", self.spacing_y),
            ("offset_x", self.offset_x),
            ("offset_y", self.offset_y),
            ("edge_clearance", self.edge_clearance),
            ("track_clearance", self.track_clearance),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(format!("{} must be finite, got {}", name, value));
        }

        // Zero spacing would never advance the scan
        if self.spacing_x <= 0.0 || self.spacing_y <= 0.0 {
            return invalid(format!(
                "spacing must be positive, got {} x {}",
                self.spacing_x, self.spacing_y
            ));
        }
        if self.via_size <= 0.0 || self.drill_size <= 0.0 {
            return invalid(format!(
                "via size and drill must be positive, got {} / {}",
                self.via_size, self.drill_size
            ));
        }
        if self.drill_size >= self.via_size {
            return invalid(format!(
                "drill {} must be smaller than via size {}",
                self.drill_size, self.via_size
            ));
        }
        if self.edge_clearance < 0.0 || self.track_clearance < 0.0 {
            return invalid(format!(
                "clearances must not be negative, got edge {} / track {}",
                self.edge_clearance, self.track_clearance
            ));
        }
        if matches!(&self.layers, Some(layers) if layers.is_empty()) {
            return invalid("explicit via layer set is empty".to_string());
        }

        Ok(())
    }
}

fn invalid(message: String) -> Result<()> {
    Err(StitchError::InvalidParameters(message))
}

/// Parameters for a removal plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovalRequest {
    pub drill_size: f64,
    pub via_size: f64,
    #[serde(default)]
    pub net: Option<String>,
    #[serde(default)]
    pub mode: RemovalMode,
}

/// A via the planner accepted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViaPlacement {
    pub position: Point,
    pub size: f64,
    pub drill: f64,
    pub net: Option<String>,
    pub net_code: Option<i32>,
    pub layers: Vec<LayerId>,
}

impl ViaPlacement {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::around(self.position, self.size)
    }

    pub fn circle(&self) -> Circle {
        Circle {
            center: self.position,
            radius: self.size / 2.0,
        }
    }
}

/// Accepted vias in scan order (row-major)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlacementResult {
    pub placements: Vec<ViaPlacement>,
    /// Set when an abort hook stopped the scan early
    pub cancelled: bool,
}

impl PlacementResult {
    pub fn count(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Vias selected for removal, in board order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RemovalResult {
    pub via_ids: Vec<ItemId>,
}

impl RemovalResult {
    pub fn count(&self) -> usize {
        self.via_ids.len()
    }
}

/// Per-call context that used to be module-level state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StitchContext {
    pub group_name: String,
}

impl Default for StitchContext {
    fn default() -> Self {
        Self {
            group_name: DEFAULT_GROUP_NAME.to_string(),
        }
    }
}
