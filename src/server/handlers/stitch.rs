//! Stitching handlers: PlanFill, PlanClear, Apply

use super::parse_params;
use crate::board::Board;
use crate::server::protocol::{error_codes, Response};
use crate::server::state::{PendingPlan, ServerState};
use crate::stitch::{
    plan_removal, ItemId, PlacementRequest, Planner, Region, RemovalMode, RemovalRequest,
    StitchError,
};
use serde::Deserialize;
use std::time::Instant;
use tracing::info;

/// Target zone id and its stitching region
fn resolve_region(
    board: &Board,
    zone_id: Option<ItemId>,
) -> Result<(ItemId, Region<'_>), StitchError> {
    let zone = board.target_zone(zone_id).ok_or(StitchError::NoTargetZone)?;
    Ok((zone.id, board.stitch_region(Some(zone.id))?))
}

/// Handle PlanFill request - plans vias for a zone and keeps the plan pending
pub fn handle_plan_fill(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize, Default)]
    struct PlanFillParams {
        #[serde(default)]
        zone_id: Option<u64>,
        /// Full request; defaults come from the design settings
        #[serde(default)]
        request: Option<PlacementRequest>,
    }

    // Any planning request discards the previous plan, even when it fails
    state.pending = None;

    let params: PlanFillParams = match parse_params(&id, params) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let Some(board) = &state.board else {
        return Response::no_file_loaded(id);
    };

    let (zone_id, region) = match resolve_region(board, params.zone_id) {
        Ok(found) => found,
        Err(e) => return Response::plan_failed(id, &e),
    };
    let request = params
        .request
        .unwrap_or_else(|| board.default_request(region.net.clone()));

    let start = Instant::now();
    let plan = match Planner::new(board, board).fill(&region, &request) {
        Ok(plan) => plan,
        Err(e) => return Response::plan_failed(id, &e),
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    info!("Planned {} vias for zone {} in {:.2}ms", plan.count(), zone_id, elapsed_ms);

    let result = serde_json::json!({
        "status": if plan.is_empty() { "empty" } else { "ok" },
        "zone_id": zone_id,
        "count": plan.count(),
        "cancelled": plan.cancelled,
        "placements": plan.placements,
        "elapsed_ms": elapsed_ms
    });
    state.pending = Some(PendingPlan::Fill { zone_id, plan });

    Response::success(id, result)
}

/// Handle PlanClear request - selects vias to remove and keeps the plan pending
pub fn handle_plan_clear(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize, Default)]
    struct PlanClearParams {
        #[serde(default)]
        zone_id: Option<u64>,
        #[serde(default)]
        mode: RemovalMode,
        #[serde(default)]
        drill_size: Option<f64>,
        #[serde(default)]
        via_size: Option<f64>,
        #[serde(default)]
        net: Option<String>,
    }

    // Any planning request discards the previous plan, even when it fails
    state.pending = None;

    let params: PlanClearParams = match parse_params(&id, params) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let Some(board) = &state.board else {
        return Response::no_file_loaded(id);
    };

    let (zone_id, region) = match resolve_region(board, params.zone_id) {
        Ok(found) => found,
        Err(e) => return Response::plan_failed(id, &e),
    };

    let request = RemovalRequest {
        drill_size: params.drill_size.unwrap_or(board.design_settings.via_drill),
        via_size: params.via_size.unwrap_or(board.design_settings.via_size),
        net: params.net.or_else(|| region.net.clone()),
        mode: params.mode,
    };

    let plan = match plan_removal(&region, &board.via_records(), &request, &state.context) {
        Ok(plan) => plan,
        Err(e) => return Response::plan_failed(id, &e),
    };

    let result = serde_json::json!({
        "status": if plan.count() == 0 { "empty" } else { "ok" },
        "zone_id": zone_id,
        "mode": request.mode,
        "count": plan.count(),
        "via_ids": plan.via_ids
    });
    state.pending = Some(PendingPlan::Clear { zone_id, plan });

    Response::success(id, result)
}

/// Handle Apply request - commits the pending plan to the in-memory board
pub fn handle_apply(state: &mut ServerState, id: Option<serde_json::Value>) -> Response {
    let Some(board) = state.board.as_mut() else {
        return Response::no_file_loaded(id);
    };

    let Some(pending) = state.pending.take() else {
        return Response::error(
            id,
            error_codes::NO_PENDING_PLAN,
            "No pending plan. Call PlanFill or PlanClear first.".to_string(),
        );
    };

    let result = match pending {
        PendingPlan::Fill { zone_id, plan } => {
            let ids = board.apply_placements(&plan, &state.context);
            serde_json::json!({
                "status": "ok",
                "zone_id": zone_id,
                "inserted": ids.len(),
                "via_ids": ids
            })
        }
        PendingPlan::Clear { zone_id, plan } => {
            let removed = board.apply_removal(&plan);
            serde_json::json!({
                "status": "ok",
                "zone_id": zone_id,
                "removed": removed
            })
        }
    };

    state.dirty = true;
    Response::success(id, result)
}
