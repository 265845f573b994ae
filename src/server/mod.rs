//! Stitching server - JSON-RPC over stdin/stdout for planning and applying via fills
//!
//! One request per line, one response per line. Logs go to stderr so they never
//! interleave with responses.
//!
//! # Module Structure
//! - `protocol` - JSON-RPC request/response types
//! - `state` - Loaded board and pending plan
//! - `handlers` - Request handlers organized by functionality

pub mod handlers;
pub mod protocol;
pub mod state;

pub use protocol::{error_codes, ErrorResponse, Request, Response};
pub use state::{PendingPlan, ServerState};

use handlers::*;
use tracing_subscriber::EnvFilter;

/// Route a request to its handler
pub fn handle_request(state: &mut ServerState, request: Request) -> Response {
    match request.method.as_str() {
        "Load" => handle_load(state, request.id, request.params),
        "Save" => handle_save(state, request.id, request.params),
        "Close" => handle_close(state, request.id),
        "GetZones" => handle_get_zones(state, request.id),
        "GetNets" => handle_get_nets(state, request.id),
        "GetDefaults" => handle_get_defaults(state, request.id, request.params),
        "PlanFill" => handle_plan_fill(state, request.id, request.params),
        "PlanClear" => handle_plan_clear(state, request.id, request.params),
        "Apply" => handle_apply(state, request.id),
        _ => Response::error(
            request.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    }
}

/// Parse one request line and handle it. Malformed JSON yields a PARSE_ERROR response.
pub fn handle_line(state: &mut ServerState, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => handle_request(state, request),
        Err(e) => Response::error(
            None,
            error_codes::PARSE_ERROR,
            format!("Failed to parse request: {}", e),
        ),
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_method() {
        let mut state = ServerState::new();
        let response = handle_line(&mut state, r#"{"id":1,"method":"Frobnicate"}"#);
        assert_eq!(response.error.map(|e| e.code), Some(error_codes::METHOD_NOT_FOUND));
    }

    #[test]
    fn test_malformed_line() {
        let mut state = ServerState::new();
        let response = handle_line(&mut state, "{not json");
        assert!(response.is_error());
        assert_eq!(response.id, None);
        assert_eq!(response.error.map(|e| e.code), Some(error_codes::PARSE_ERROR));
    }

    #[test]
    fn test_requires_loaded_board() {
        let mut state = ServerState::new();
        let methods = [
            "GetZones",
            "GetNets",
            "GetDefaults",
            "PlanFill",
            "PlanClear",
            "Apply",
            "Save",
        ];
        for method in methods {
            let line = format!(r#"{{"id":7,"method":"{}"}}"#, method);
            let response = handle_line(&mut state, &line);
            assert_eq!(
                response.error.map(|e| e.code),
                Some(error_codes::NO_FILE_LOADED),
                "{} should need a board",
                method
            );
        }
    }

    #[test]
    fn test_malformed_params_rejected() {
        let mut state = ServerState::new();
        let lines = [
            r#"{"id":1,"method":"GetDefaults","params":{"zone_id":"one"}}"#,
            r#"{"id":2,"method":"Save","params":{"file_path":5}}"#,
            r#"{"id":3,"method":"Load","params":{"file_path":[]}}"#,
            r#"{"id":4,"method":"PlanFill","params":{"zone_id":-1}}"#,
            r#"{"id":5,"method":"PlanClear","params":{"mode":"Everything"}}"#,
        ];
        for line in lines {
            let response = handle_line(&mut state, line);
            assert_eq!(response.error_code(), Some(error_codes::INVALID_PARAMS), "{}", line);
        }
    }

    #[test]
    fn test_load_missing_params() {
        let mut state = ServerState::new();
        let response = handle_line(&mut state, r#"{"id":1,"method":"Load"}"#);
        assert_eq!(response.error.map(|e| e.code), Some(error_codes::INVALID_PARAMS));
        assert!(!state.is_file_loaded());
    }

    #[test]
    fn test_close_without_board() {
        let mut state = ServerState::new();
        let response = handle_line(&mut state, r#"{"id":2,"method":"Close"}"#);
        assert!(!response.is_error());
    }
}
