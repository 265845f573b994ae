// End-to-end JSON-RPC session against the fixture board
use serde_json::{json, Value};
use via_stitch::server::{error_codes, handle_line, ServerState};

const FIXTURE: &str = "tests/data/stitch_board.json";

fn call(state: &mut ServerState, id: u64, method: &str, params: Value) -> Value {
    let line = json!({ "id": id, "method": method, "params": params }).to_string();
    let response = handle_line(state, &line);
    serde_json::to_value(&response).expect("Response should serialize")
}

fn fill_request() -> Value {
    json!({
        "via_size": 600000.0,
        "drill_size": 300000.0,
        "spacing_x": 1200000.0,
        "spacing_y": 1200000.0,
        "offset_x": 600000.0,
        "offset_y": 600000.0,
        "track_clearance": 200000.0
    })
}

fn temp_board_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("via_stitch_{}_{}.json", name, std::process::id()))
}

#[test]
fn test_load_and_query() {
    let mut state = ServerState::new();
    let loaded = call(&mut state, 1, "Load", json!({ "file_path": FIXTURE }));
    assert_eq!(loaded["result"]["status"], "ok");
    assert_eq!(loaded["result"]["zones"], 4);
    assert_eq!(loaded["result"]["stitching_vias"], 1);

    let zones = call(&mut state, 2, "GetZones", Value::Null);
    let zones = zones["result"].as_array().expect("zone list");
    assert_eq!(zones.len(), 4);
    assert_eq!(zones[0]["net"], "GND");
    assert_eq!(zones[0]["selected"], true);

    let nets = call(&mut state, 3, "GetNets", Value::Null);
    let names: Vec<&str> = nets["result"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|n| n["name"].as_str())
        .collect();
    assert_eq!(names, vec!["GND", "VCC"]);

    let defaults = call(&mut state, 4, "GetDefaults", json!({ "zone_id": 1 }));
    assert_eq!(defaults["result"]["via_size"], 600000.0);
    assert_eq!(defaults["result"]["spacing_x"], 1200000.0);
    assert_eq!(defaults["result"]["track_clearance"], 200000.0);
    assert_eq!(defaults["result"]["net"], "GND");
    assert_eq!(defaults["result"]["pattern"], "Grid");
}

#[test]
fn test_load_missing_file() {
    let mut state = ServerState::new();
    let response = call(&mut state, 1, "Load", json!({ "file_path": "tests/data/missing.json" }));
    assert_eq!(response["error"]["code"], error_codes::PARSE_FAILED);
    assert!(!state.is_file_loaded());
}

#[test]
fn test_plan_apply_save_session() {
    let mut state = ServerState::new();
    call(&mut state, 1, "Load", json!({ "file_path": FIXTURE }));

    let plan = call(&mut state, 2, "PlanFill", json!({ "zone_id": 1, "request": fill_request() }));
    assert_eq!(plan["result"]["count"], 72);
    assert_eq!(plan["result"]["cancelled"], false);
    assert!(!state.dirty, "planning must not touch the board");

    let applied = call(&mut state, 3, "Apply", Value::Null);
    assert_eq!(applied["result"]["inserted"], 72);
    assert!(state.dirty);

    // The plan is consumed
    let again = call(&mut state, 4, "Apply", Value::Null);
    assert_eq!(again["error"]["code"], error_codes::NO_PENDING_PLAN);

    let path = temp_board_path("session");
    let saved = call(&mut state, 5, "Save", json!({ "file_path": path }));
    assert_eq!(saved["result"]["status"], "ok");
    assert!(!state.dirty);

    let mut reloaded = ServerState::new();
    call(&mut reloaded, 6, "Load", json!({ "file_path": path }));
    assert_eq!(reloaded.board.as_ref().map(|b| b.vias().count()), Some(74));

    let clear = call(&mut reloaded, 7, "PlanClear", json!({ "zone_id": 1, "mode": "GroupOnly" }));
    assert_eq!(clear["result"]["count"], 73);
    let applied = call(&mut reloaded, 8, "Apply", Value::Null);
    assert_eq!(applied["result"]["removed"], 73);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_plan_clear_by_attributes() {
    let mut state = ServerState::new();
    call(&mut state, 1, "Load", json!({ "file_path": FIXTURE }));

    let clear = call(&mut state, 2, "PlanClear", json!({ "mode": "AttributeMatch" }));
    assert_eq!(clear["result"]["via_ids"], json!([11]));
}

#[test]
fn test_plan_failures() {
    let mut state = ServerState::new();
    call(&mut state, 1, "Load", json!({ "file_path": FIXTURE }));

    for zone_id in [3, 4, 99] {
        let response = call(&mut state, 2, "PlanFill", json!({ "zone_id": zone_id }));
        assert_eq!(response["error"]["code"], error_codes::PLAN_FAILED, "zone {}", zone_id);
    }
    let keepout = call(&mut state, 2, "PlanFill", json!({ "zone_id": 3 }));
    assert_eq!(keepout["error"]["kind"], "RegionNotPourable");

    let mut bad = fill_request();
    bad["spacing_x"] = json!(0.0);
    let response = call(&mut state, 3, "PlanFill", json!({ "request": bad }));
    assert_eq!(response["error"]["code"], error_codes::PLAN_FAILED);
    assert_eq!(response["error"]["kind"], "InvalidParameters");
    assert!(state.pending.is_none());

    let response = call(&mut state, 4, "PlanFill", json!({ "request": { "via_size": 1.0 } }));
    assert_eq!(response["error"]["code"], error_codes::INVALID_PARAMS);
}

#[test]
fn test_failed_plan_discards_previous_plan() {
    let mut state = ServerState::new();
    call(&mut state, 1, "Load", json!({ "file_path": FIXTURE }));

    let plan = call(&mut state, 2, "PlanFill", json!({ "request": fill_request() }));
    assert_eq!(plan["result"]["count"], 72);

    let mut bad = fill_request();
    bad["spacing_x"] = json!(0.0);
    let failed = call(&mut state, 3, "PlanFill", json!({ "request": bad }));
    assert_eq!(failed["error"]["kind"], "InvalidParameters");

    let applied = call(&mut state, 4, "Apply", Value::Null);
    assert_eq!(applied["error"]["code"], error_codes::NO_PENDING_PLAN);
    assert_eq!(state.board.as_ref().map(|b| b.vias().count()), Some(2));
    assert!(!state.dirty);

    // Same for removal plans, and for malformed params
    let clear = call(&mut state, 5, "PlanClear", json!({ "mode": "GroupOnly" }));
    assert_eq!(clear["result"]["count"], 1);
    let failed = call(&mut state, 6, "PlanClear", json!({ "zone_id": 99 }));
    assert_eq!(failed["error"]["kind"], "NoTargetZone");
    let applied = call(&mut state, 7, "Apply", Value::Null);
    assert_eq!(applied["error"]["code"], error_codes::NO_PENDING_PLAN);

    call(&mut state, 8, "PlanClear", json!({ "mode": "GroupOnly" }));
    let malformed = call(&mut state, 9, "PlanFill", json!({ "request": { "via_size": 1.0 } }));
    assert_eq!(malformed["error"]["code"], error_codes::INVALID_PARAMS);
    assert!(state.pending.is_none());
}

#[test]
fn test_close_resets_state() {
    let mut state = ServerState::new();
    call(&mut state, 1, "Load", json!({ "file_path": FIXTURE }));
    call(&mut state, 2, "PlanFill", json!({ "request": fill_request() }));
    assert!(state.pending.is_some());

    call(&mut state, 3, "Close", Value::Null);
    assert!(!state.is_file_loaded());
    assert!(state.pending.is_none());
}
