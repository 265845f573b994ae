//! Query handlers: GetZones, GetNets, GetDefaults

use super::parse_params;
use crate::server::protocol::{error_codes, Response};
use crate::server::state::ServerState;
use serde::Deserialize;

/// Handle GetZones request - lists zones with their nets and bounds
pub fn handle_get_zones(state: &ServerState, id: Option<serde_json::Value>) -> Response {
    let Some(board) = &state.board else {
        return Response::no_file_loaded(id);
    };

    let zones: Vec<serde_json::Value> = board
        .zones
        .iter()
        .map(|zone| {
            serde_json::json!({
                "id": zone.id,
                "net": zone.net,
                "layers": zone.layers,
                "keepout": zone.keepout,
                "selected": zone.selected,
                "bounds": zone.bounding_box(),
            })
        })
        .collect();

    Response::success(id, serde_json::Value::Array(zones))
}

/// Handle GetNets request - returns net names and codes in board order
pub fn handle_get_nets(state: &ServerState, id: Option<serde_json::Value>) -> Response {
    let Some(board) = &state.board else {
        return Response::no_file_loaded(id);
    };

    let nets: Vec<serde_json::Value> = board
        .nets
        .iter()
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, code)| serde_json::json!({ "name": name, "code": code }))
        .collect();

    Response::success(id, serde_json::Value::Array(nets))
}

/// Handle GetDefaults request - fill request seeded from the design settings
pub fn handle_get_defaults(
    state: &ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize, Default)]
    struct DefaultsParams {
        #[serde(default)]
        zone_id: Option<u64>,
    }

    let params: DefaultsParams = match parse_params(&id, params) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let Some(board) = &state.board else {
        return Response::no_file_loaded(id);
    };

    let net = board.target_zone(params.zone_id).and_then(|z| z.net.clone());
    match serde_json::to_value(board.default_request(net)) {
        Ok(value) => Response::success(id, value),
        Err(e) => Response::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}
