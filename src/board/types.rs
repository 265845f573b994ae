//! Board snapshot types
//!
//! A board is loaded from JSON: nets, copper layers, zones with their poured
//! copper per layer, the track list (segments, arcs and vias, in board order)
//! and footprints with pads.

use indexmap::IndexMap;
use rstar::RTree;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::stitch::{BoundingBox, ItemId, LayerId, Point};

use super::fill::Triangle;
use super::spatial::IndexedItem;

/// Nanometres per millimetre
pub const NM_PER_MM: f64 = 1_000_000.0;

/// Board-wide via and clearance defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSettings {
    pub via_size: f64,
    pub via_drill: f64,
    /// Largest clearance of any netclass
    pub biggest_clearance: f64,
}

impl Default for DesignSettings {
    fn default() -> Self {
        Self {
            via_size: 0.6 * NM_PER_MM,
            via_drill: 0.3 * NM_PER_MM,
            biggest_clearance: 0.2 * NM_PER_MM,
        }
    }
}

/// Board layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: LayerId,
    #[serde(default = "default_true")]
    pub copper: bool,
}

fn default_true() -> bool {
    true
}

/// Filled polygon with optional holes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledPolygon {
    pub outline: Vec<Point>,
    #[serde(default)]
    pub holes: Vec<Vec<Point>>,
}

/// Copper zone (or keep-out) with its poured copper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: ItemId,
    #[serde(default)]
    pub net: Option<String>,
    pub layers: Vec<LayerId>,
    pub outline: Vec<Point>,
    /// Keep-out zones forbid copper pour
    #[serde(default)]
    pub keepout: bool,
    #[serde(default)]
    pub selected: bool,
    /// Poured copper per layer
    #[serde(default)]
    pub filled: IndexMap<LayerId, Vec<FilledPolygon>>,
    #[serde(skip)]
    pub(crate) triangles: HashMap<LayerId, Vec<Triangle>>,
}

impl Zone {
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.outline)
    }

    pub fn primary_layer(&self) -> Option<&str> {
        self.layers.first().map(String::as_str)
    }
}

/// Track segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: ItemId,
    pub start: Point,
    pub end: Point,
    pub width: f64,
    pub layer: LayerId,
    #[serde(default)]
    pub net: Option<String>,
}

/// Circular track arc through `start`, `mid` and `end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcTrack {
    pub id: ItemId,
    pub start: Point,
    pub mid: Point,
    pub end: Point,
    pub width: f64,
    pub layer: LayerId,
    #[serde(default)]
    pub net: Option<String>,
}

/// Via on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Via {
    pub id: ItemId,
    pub position: Point,
    pub width: f64,
    pub drill: f64,
    pub layers: Vec<LayerId>,
    #[serde(default)]
    pub net: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

/// Entry of the board track list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackItem {
    Segment(Segment),
    Arc(ArcTrack),
    Via(Via),
}

/// Track list entry as stored in the file. Kinds this crate does not model are
/// kept verbatim so the board saves back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackEntry {
    Known(TrackItem),
    Unknown(UnknownItem),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownItem {
    pub kind: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl TrackEntry {
    pub fn id(&self) -> Option<ItemId> {
        match self {
            TrackEntry::Known(TrackItem::Segment(s)) => Some(s.id),
            TrackEntry::Known(TrackItem::Arc(a)) => Some(a.id),
            TrackEntry::Known(TrackItem::Via(v)) => Some(v.id),
            TrackEntry::Unknown(item) => item.fields.get("id").and_then(|v| v.as_u64()),
        }
    }
}

/// Footprint pad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub id: ItemId,
    pub position: Point,
    /// Width and height before rotation
    pub size: [f64; 2],
    /// Rotation in degrees
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub net: Option<String>,
}

impl Pad {
    /// Bounding box of the rotated pad rectangle
    pub fn bounding_box(&self) -> BoundingBox {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let half_w = self.size[0] / 2.0;
        let half_h = self.size[1] / 2.0;
        let ext_x = (half_w * cos).abs() + (half_h * sin).abs();
        let ext_y = (half_w * sin).abs() + (half_h * cos).abs();
        BoundingBox::new(
            self.position.x - ext_x,
            self.position.y - ext_y,
            self.position.x + ext_x,
            self.position.y + ext_y,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub reference: String,
    pub pads: Vec<Pad>,
}

impl Footprint {
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.pads
            .iter()
            .map(Pad::bounding_box)
            .reduce(|a, b| a.union(&b))
    }
}

/// Board snapshot
#[derive(Default, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub design_settings: DesignSettings,
    #[serde(default)]
    pub layers: Vec<Layer>,
    /// Net name to net code, in file order
    #[serde(default)]
    pub nets: IndexMap<String, i32>,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub tracks: Vec<TrackEntry>,
    #[serde(default)]
    pub footprints: Vec<Footprint>,
    /// Named item groups present on the board
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(skip)]
    pub(crate) index: RTree<IndexedItem>,
}

impl Board {
    pub fn is_copper_layer(&self, name: &str) -> bool {
        self.layers.iter().any(|l| l.name == name && l.copper)
    }

    pub fn vias(&self) -> impl Iterator<Item = &Via> {
        self.tracks.iter().filter_map(|entry| match entry {
            TrackEntry::Known(TrackItem::Via(via)) => Some(via),
            _ => None,
        })
    }

    pub fn zone(&self, id: ItemId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Next free item id across zones, tracks and pads
    pub fn next_item_id(&self) -> ItemId {
        let zones = self.zones.iter().map(|z| z.id);
        let tracks = self.tracks.iter().filter_map(TrackEntry::id);
        let pads = self.footprints.iter().flat_map(|f| f.pads.iter().map(|p| p.id));
        zones.chain(tracks).chain(pads).max().map_or(1, |id| id + 1)
    }
}
