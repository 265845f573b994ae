//! Region selection, request defaults and plan application

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::stitch::{
    ItemId, Pattern, PlacementRequest, PlacementResult, Region, RemovalResult, StitchContext,
    StitchError, ViaRecord,
};

use super::types::{Board, TrackEntry, TrackItem, Via, Zone};

impl Board {
    /// The zone to stitch: `zone_id` if given, otherwise the selected zone
    pub fn target_zone(&self, zone_id: Option<ItemId>) -> Option<&Zone> {
        match zone_id {
            Some(id) => self.zone(id),
            None => self.zones.iter().find(|z| z.selected),
        }
    }

    /// Build the stitching region for the target zone. The zone must sit on
    /// copper and allow copper pour.
    pub fn stitch_region(&self, zone_id: Option<ItemId>) -> Result<Region<'_>, StitchError> {
        let zone = self.target_zone(zone_id).ok_or(StitchError::NoTargetZone)?;
        if let Some(layer) = zone.layers.iter().find(|l| !self.is_copper_layer(l)) {
            return Err(StitchError::NotCopperLayer(layer.clone()));
        }
        if zone.keepout {
            return Err(StitchError::RegionNotPourable);
        }

        Ok(Region {
            corners: zone.outline.clone(),
            net: zone.net.clone(),
            layers: zone.layers.clone(),
            allows_copper_pour: !zone.keepout,
            area: zone,
        })
    }

    /// Fill request seeded from the design settings: current via size and
    /// drill, spacing twice the via size, no offsets, edge clearance off and
    /// track clearance at the board's biggest clearance
    pub fn default_request(&self, net: Option<String>) -> PlacementRequest {
        let settings = &self.design_settings;
        PlacementRequest {
            via_size: settings.via_size,
            drill_size: settings.via_drill,
            spacing_x: settings.via_size * 2.0,
            spacing_y: settings.via_size * 2.0,
            offset_x: 0.0,
            offset_y: 0.0,
            edge_clearance: 0.0,
            track_clearance: settings.biggest_clearance,
            net,
            layers: None,
            pattern: Pattern::Grid,
        }
    }

    /// Snapshot of every via, in board order
    pub fn via_records(&self) -> Vec<ViaRecord> {
        self.vias().map(Via::record).collect()
    }

    /// Insert planned vias, tagged with the context group. Returns new ids.
    pub fn apply_placements(
        &mut self,
        plan: &PlacementResult,
        context: &StitchContext,
    ) -> Vec<ItemId> {
        if plan.is_empty() {
            return vec![];
        }
        if !self.groups.contains(&context.group_name) {
            debug!("Creating group {}", context.group_name);
            self.groups.push(context.group_name.clone());
        }

        let first_id = self.next_item_id();
        let mut ids = Vec::with_capacity(plan.count());
        for (offset, placement) in plan.placements.iter().enumerate() {
            let id = first_id + offset as ItemId;
            self.tracks.push(TrackEntry::Known(TrackItem::Via(Via {
                id,
                position: placement.position,
                width: placement.size,
                drill: placement.drill,
                layers: placement.layers.clone(),
                net: placement.net.clone(),
                group: Some(context.group_name.clone()),
            })));
            ids.push(id);
        }

        self.rebuild_index();
        info!("Inserted {} vias", ids.len());
        ids
    }

    /// Delete planned vias. Returns how many were removed.
    pub fn apply_removal(&mut self, plan: &RemovalResult) -> usize {
        let targets: HashSet<ItemId> = plan.via_ids.iter().copied().collect();
        let before = self.tracks.len();
        self.tracks.retain(|entry| match entry {
            TrackEntry::Known(TrackItem::Via(via)) => !targets.contains(&via.id),
            _ => true,
        });
        let removed = before - self.tracks.len();

        if removed != targets.len() {
            warn!("Removal plan named {} vias, {} were on the board", targets.len(), removed);
        }

        self.rebuild_index();
        info!("Removed {} vias", removed);
        removed
    }
}
