//! R-tree candidate collection over the board
//!
//! Tracks, arcs, vias and footprints are indexed by bounding box. Zones are
//! few and are scanned directly.

use rstar::{RTree, RTreeObject, AABB};

use crate::stitch::{
    BoundingBox, CandidateSource, ExistingItem, NetLookup, Result, StitchError, ViaRecord,
};

use super::types::{Board, TrackEntry, TrackItem, Via};

/// What an index entry points at. Ordered so hits can be replayed in board order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum IndexedTarget {
    Track(usize),
    Footprint(usize),
}

/// Object wrapper for R-tree spatial indexing
#[derive(Clone, Debug)]
pub struct IndexedItem {
    pub target: IndexedTarget,
    pub bounds: AABB<[f64; 2]>,
}

impl IndexedItem {
    fn new(target: IndexedTarget, bbox: BoundingBox) -> Self {
        Self {
            target,
            bounds: to_aabb(&bbox),
        }
    }
}

impl RTreeObject for IndexedItem {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.bounds
    }
}

fn to_aabb(bbox: &BoundingBox) -> AABB<[f64; 2]> {
    AABB::from_corners([bbox.min_x, bbox.min_y], [bbox.max_x, bbox.max_y])
}

impl Via {
    pub fn record(&self) -> ViaRecord {
        ViaRecord {
            id: self.id,
            position: self.position,
            width: self.width,
            drill: self.drill,
            net: self.net.clone(),
            group: self.group.clone(),
        }
    }
}

impl Board {
    /// Rebuild the R-tree after the track list or footprints change
    pub fn rebuild_index(&mut self) {
        let tracks = self.tracks.iter().enumerate().filter_map(|(i, entry)| {
            let bbox = match entry {
                TrackEntry::Known(TrackItem::Segment(s)) => s.bounding_box(),
                TrackEntry::Known(TrackItem::Arc(a)) => a.bounding_box(),
                TrackEntry::Known(TrackItem::Via(v)) => v.record().bounding_box(),
                TrackEntry::Unknown(_) => return None,
            };
            Some(IndexedItem::new(IndexedTarget::Track(i), bbox))
        });
        let footprints = self.footprints.iter().enumerate().filter_map(|(i, fp)| {
            fp.bounding_box()
                .map(|bbox| IndexedItem::new(IndexedTarget::Footprint(i), bbox))
        });

        self.index = RTree::bulk_load(tracks.chain(footprints).collect());
    }

    pub fn indexed_item_count(&self) -> usize {
        self.index.size()
    }
}

impl CandidateSource for Board {
    fn collect_candidate_items(
        &self,
        bounds: &BoundingBox,
        region_net: Option<&str>,
    ) -> Result<Vec<ExistingItem<'_>>> {
        // Items we cannot model might overlap anywhere; refuse to under-report
        if let Some(TrackEntry::Unknown(item)) = self
            .tracks
            .iter()
            .find(|entry| matches!(entry, TrackEntry::Unknown(_)))
        {
            return Err(StitchError::UnsupportedItemKind(item.kind.clone()));
        }

        let mut hits: Vec<IndexedTarget> = self
            .index
            .locate_in_envelope_intersecting(&to_aabb(bounds))
            .map(|item| item.target)
            .collect();
        hits.sort_unstable();

        let mut items = Vec::new();
        for target in hits {
            match target {
                IndexedTarget::Track(i) => match &self.tracks[i] {
                    TrackEntry::Known(TrackItem::Segment(s)) => {
                        items.push(ExistingItem::Track {
                            shape: s,
                            is_arc: false,
                        });
                    }
                    TrackEntry::Known(TrackItem::Arc(a)) => {
                        items.push(ExistingItem::Track {
                            shape: a,
                            is_arc: true,
                        });
                    }
                    TrackEntry::Known(TrackItem::Via(v)) => {
                        items.push(ExistingItem::Via(v.record()));
                    }
                    TrackEntry::Unknown(item) => {
                        return Err(StitchError::UnsupportedItemKind(item.kind.clone()));
                    }
                },
                IndexedTarget::Footprint(i) => {
                    items.extend(
                        self.footprints[i]
                            .pads
                            .iter()
                            .map(|pad| ExistingItem::Pad {
                                bounds: pad.bounding_box(),
                            }),
                    );
                }
            }
        }

        for zone in &self.zones {
            if zone.net.as_deref() == region_net {
                continue;
            }
            let (Some(bbox), Some(layer)) = (zone.bounding_box(), zone.primary_layer()) else {
                continue;
            };
            if bbox.intersects(bounds) {
                items.push(ExistingItem::Zone {
                    net: zone.net.clone(),
                    layer: layer.to_string(),
                    area: zone,
                });
            }
        }

        Ok(items)
    }
}

impl NetLookup for Board {
    fn net_code(&self, name: &str) -> Option<i32> {
        self.nets.get(name).copied()
    }
}
