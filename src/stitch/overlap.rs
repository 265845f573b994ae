//! Overlap detection between a candidate via and existing board items

use super::types::{ExistingItem, ViaPlacement};

/// Settings shared by every overlap test of one fill run
#[derive(Debug, Clone, Copy)]
pub struct OverlapParams<'a> {
    pub track_clearance: f64,
    /// Layer other-net zones are probed on
    pub zone_layer: &'a str,
    /// Net of the vias being placed; zones on it never block
    pub target_net: Option<&'a str>,
}

/// True if `via` collides with any item. Stops at the first hit.
pub fn overlaps(
    via: &ViaPlacement,
    items: &[ExistingItem<'_>],
    params: &OverlapParams<'_>,
) -> bool {
    let via_bounds = via.bounding_box();
    let via_circle = via.circle();

    items.iter().any(|item| match item {
        // Coarse box test, no clearance
        ExistingItem::Pad { bounds } => bounds.intersects(&via_bounds),
        ExistingItem::Track { shape, .. } => shape.collides(&via_circle, params.track_clearance),
        // Both footprints are round; their boxes are a conservative stand-in
        ExistingItem::Via(existing) => existing.bounding_box().intersects(&via_bounds),
        ExistingItem::Zone { net, area, .. } => {
            net.as_deref() != params.target_net
                && area.contains_filled(params.zone_layer, via.position)
        }
    })
}
