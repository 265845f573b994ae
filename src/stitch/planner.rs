//! Fill and removal planning
//!
//! The fill planner walks a Grid or Star lattice across the region's bounding
//! box and keeps every point that is poured on all region layers, clear of
//! existing items and (optionally) clear of the region outline. The removal
//! planner selects existing vias either by group tag or by exact attributes.
//! Neither touches the board; callers apply the returned plans.

use std::time::Instant;
use tracing::{debug, info};

use super::clearance::is_clear;
use super::collab::{CandidateSource, NetLookup};
use super::error::{Result, StitchError};
use super::geometry::{BoundingBox, Point};
use super::overlap::{overlaps, OverlapParams};
use super::types::{
    Pattern, PlacementRequest, PlacementResult, Region, RemovalMode, RemovalRequest,
    RemovalResult, StitchContext, ViaPlacement, ViaRecord,
};

/// Candidate positions over a bounding box, scanned row by row
///
/// Both bounds are inclusive: a span that is an exact multiple of the spacing
/// puts a candidate on the far edge. Coordinates come from the row and column
/// index, so repeated scans are bit-identical.
#[derive(Debug, Clone, Copy)]
pub struct Lattice {
    bounds: BoundingBox,
    offset: Point,
    spacing_x: f64,
    spacing_y: f64,
    pattern: Pattern,
}

impl Lattice {
    /// Spacings must already be validated as positive
    pub fn new(bounds: BoundingBox, request: &PlacementRequest) -> Self {
        Self {
            bounds,
            offset: Point::new(request.offset_x, request.offset_y),
            spacing_x: request.spacing_x,
            spacing_y: request.spacing_y,
            pattern: request.pattern,
        }
    }

    /// Y coordinate of each row, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = f64> + '_ {
        let start = self.bounds.top() + self.offset.y;
        let bottom = self.bounds.bottom();
        let spacing = self.spacing_y;
        (0u64..)
            .map(move |row| start + row as f64 * spacing)
            .take_while(move |&y| y <= bottom)
    }

    /// Candidate points of row `row` at height `y`, left to right
    pub fn row_points(&self, row: usize, y: f64) -> impl Iterator<Item = Point> + '_ {
        // Star shifts every second row, however many points the previous row
        // kept. Half the spacing is truncated to whole nanometres.
        let shift = match self.pattern {
            Pattern::Star if row % 2 == 1 => (self.spacing_x / 2.0).trunc(),
            _ => 0.0,
        };
        let start = self.bounds.left() + self.offset.x + shift;
        let right = self.bounds.right();
        let spacing = self.spacing_x;
        (0u64..)
            .map(move |col| start + col as f64 * spacing)
            .take_while(move |&x| x <= right)
            .map(move |x| Point::new(x, y))
    }

    /// Every candidate in scan order
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.rows()
            .enumerate()
            .flat_map(move |(row, y)| self.row_points(row, y))
    }
}

/// Fill planner bound to the host's candidate source and net table
pub struct Planner<'a> {
    source: &'a dyn CandidateSource,
    nets: &'a dyn NetLookup,
}

impl<'a> Planner<'a> {
    pub fn new(source: &'a dyn CandidateSource, nets: &'a dyn NetLookup) -> Self {
        Self { source, nets }
    }

    /// Plan a full fill of `region`
    pub fn fill(&self, region: &Region<'_>, request: &PlacementRequest) -> Result<PlacementResult> {
        self.fill_until(region, request, |_| false)
    }

    /// Plan a fill, asking `abort` before each row (with the row index) whether
    /// to stop. An abort returns the rows finished so far with `cancelled` set.
    pub fn fill_until<F>(
        &self,
        region: &Region<'_>,
        request: &PlacementRequest,
        mut abort: F,
    ) -> Result<PlacementResult>
    where
        F: FnMut(usize) -> bool,
    {
        let start = Instant::now();

        request.validate()?;
        region.validate()?;
        if !region.allows_copper_pour {
            return Err(StitchError::RegionNotPourable);
        }

        let bounds = region
            .bounding_box()
            .ok_or_else(|| StitchError::DegenerateRegion("region has no corners".to_string()))?;
        let zone_layer = region
            .primary_layer()
            .ok_or_else(|| StitchError::DegenerateRegion("region spans no layers".to_string()))?;

        let target_net = request
            .net
            .as_deref()
            .or(region.net.as_deref())
            .filter(|name| !name.is_empty());
        let net_code = match target_net {
            Some(name) => Some(
                self.nets
                    .net_code(name)
                    .ok_or_else(|| StitchError::UnknownNet(name.to_string()))?,
            ),
            None => None,
        };
        let via_layers = request.layers.clone().unwrap_or_else(|| region.layers.clone());

        let items = self
            .source
            .collect_candidate_items(&bounds, region.net.as_deref())?;
        debug!(
            "Collected {} overlap candidates in [{}, {}] x [{}, {}]",
            items.len(),
            bounds.left(),
            bounds.right(),
            bounds.top(),
            bounds.bottom()
        );

        let params = OverlapParams {
            track_clearance: request.track_clearance,
            zone_layer,
            target_net,
        };
        let lattice = Lattice::new(bounds, request);

        let mut result = PlacementResult::default();
        let mut scanned = 0usize;

        for (row, y) in lattice.rows().enumerate() {
            if abort(row) {
                info!("Fill cancelled before row {}", row);
                result.cancelled = true;
                break;
            }

            for position in lattice.row_points(row, y) {
                scanned += 1;

                if !region.contains_filled_on_all_layers(position) {
                    continue;
                }

                let via = ViaPlacement {
                    position,
                    size: request.via_size,
                    drill: request.drill_size,
                    net: target_net.map(str::to_string),
                    net_code,
                    layers: via_layers.clone(),
                };

                if overlaps(&via, &items, &params) {
                    continue;
                }

                // Zero edge clearance disables the outline check
                if request.edge_clearance > 0.0
                    && !is_clear(position, &region.corners, request.edge_clearance)?
                {
                    continue;
                }

                result.placements.push(via);
            }
        }

        info!(
            "Fill plan: {} of {} candidates accepted ({} overlap items) in {:?}",
            result.count(),
            scanned,
            items.len(),
            start.elapsed()
        );

        Ok(result)
    }
}

/// Select existing vias for removal, in board order
///
/// `GroupOnly` ignores geometry and attributes and picks vias tagged with the
/// context group. `AttributeMatch` ignores tags and picks vias poured into the
/// region's primary layer whose drill, width and net all match the request.
pub fn plan_removal(
    region: &Region<'_>,
    vias: &[ViaRecord],
    request: &RemovalRequest,
    context: &StitchContext,
) -> Result<RemovalResult> {
    let via_ids = match request.mode {
        RemovalMode::GroupOnly => vias
            .iter()
            .filter(|via| via.group.as_deref() == Some(context.group_name.as_str()))
            .map(|via| via.id)
            .collect(),
        RemovalMode::AttributeMatch => {
            let layer = region.primary_layer().ok_or_else(|| {
                StitchError::DegenerateRegion("region spans no layers".to_string())
            })?;
            vias.iter()
                .filter(|via| {
                    region.area.contains_filled(layer, via.position)
                        && via.drill == request.drill_size
                        && via.width == request.via_size
                        && via.net == request.net
                })
                .map(|via| via.id)
                .collect()
        }
    };

    let result = RemovalResult { via_ids };
    info!("Removal plan ({:?}): {} vias selected", request.mode, result.count());
    Ok(result)
}
