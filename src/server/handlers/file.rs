//! Board file handlers: Load, Save, Close

use super::parse_params;
use crate::board::Board;
use crate::server::protocol::{error_codes, Response};
use crate::server::state::ServerState;
use serde::Deserialize;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Deserialize, Default)]
struct PathParams {
    #[serde(default)]
    file_path: Option<String>,
}

/// Load a board snapshot, replacing any open board and pending plan
pub fn handle_load(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let params: PathParams = match parse_params(&id, params) {
        Ok(p) => p,
        Err(response) => return response,
    };
    let Some(path) = params.file_path else {
        return Response::error(
            id,
            error_codes::INVALID_PARAMS,
            "Invalid params: expected {file_path: string}".to_string(),
        );
    };

    if state.dirty {
        warn!("Discarding unsaved changes to {:?}", state.board_path);
    }

    let start = Instant::now();
    let board = match Board::load(&path) {
        Ok(board) => board,
        Err(e) => {
            let message = format!("Failed to load board: {:#}", e);
            return Response::error(id, error_codes::PARSE_FAILED, message);
        }
    };

    let stitched = board
        .vias()
        .filter(|v| v.group.as_deref() == Some(state.context.group_name.as_str()))
        .count();
    let summary = serde_json::json!({
        "status": "ok",
        "file_path": path,
        "zones": board.zones.len(),
        "tracks": board.tracks.len(),
        "footprints": board.footprints.len(),
        "nets": board.nets.len(),
        "stitching_vias": stitched,
        "elapsed_ms": start.elapsed().as_secs_f64() * 1000.0
    });
    info!("Board ready: {} zones, {} stitching vias", board.zones.len(), stitched);

    state.board_path = Some(path);
    state.board = Some(board);
    state.pending = None;
    state.dirty = false;

    Response::success(id, summary)
}

/// Write the board to `file_path`, or back to where it was loaded from
pub fn handle_save(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let params: PathParams = match parse_params(&id, params) {
        Ok(p) => p,
        Err(response) => return response,
    };
    let Some(board) = &state.board else {
        return Response::no_file_loaded(id);
    };
    let Some(path) = params.file_path.or_else(|| state.board_path.clone()) else {
        return Response::error(
            id,
            error_codes::INVALID_PARAMS,
            "Invalid params: no file_path and no loaded path".to_string(),
        );
    };

    if let Err(e) = board.save(&path) {
        let message = format!("Failed to save board: {:#}", e);
        return Response::error(id, error_codes::SAVE_FAILED, message);
    }

    state.dirty = false;
    Response::success(id, serde_json::json!({ "status": "ok", "file_path": path }))
}

/// Drop the board and any pending plan
pub fn handle_close(state: &mut ServerState, id: Option<serde_json::Value>) -> Response {
    if state.dirty {
        warn!("Closing board with unsaved changes");
    }
    *state = ServerState::new();
    Response::success(id, serde_json::json!({ "status": "ok" }))
}
