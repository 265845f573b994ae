//! Wire format of the stitching server
//!
//! Each stdin line holds one request and each stdout line one response. A
//! response carries either `result` or `error`, never both.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::stitch::StitchError;

#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub message: String,
    /// Planner error variant for `PLAN_FAILED`, so clients need not parse messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl Response {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Response {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: String) -> Self {
        Response {
            id,
            result: None,
            error: Some(ErrorResponse {
                code,
                message,
                kind: None,
            }),
        }
    }

    /// Board methods called before `Load`
    pub fn no_file_loaded(id: Option<Value>) -> Self {
        Self::error(id, error_codes::NO_FILE_LOADED, "No file loaded. Call Load first.".to_string())
    }

    /// A planner call rejected its inputs
    pub fn plan_failed(id: Option<Value>, err: &StitchError) -> Self {
        Response {
            id,
            result: None,
            error: Some(ErrorResponse {
                code: error_codes::PLAN_FAILED,
                message: err.to_string(),
                kind: Some(err.kind()),
            }),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error_code(&self) -> Option<i32> {
        self.error.as_ref().map(|e| e.code)
    }
}

/// JSON-RPC reserved codes, then stitching server codes
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    pub const NO_FILE_LOADED: i32 = 2;
    pub const SAVE_FAILED: i32 = 4;
    pub const PARSE_FAILED: i32 = 5;
    /// Planner error; the response names the variant in `kind`
    pub const PLAN_FAILED: i32 = 6;
    /// `Apply` without a preceding `PlanFill` or `PlanClear`
    pub const NO_PENDING_PLAN: i32 = 7;
}
