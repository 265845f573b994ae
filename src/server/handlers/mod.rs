//! Handler module declarations and re-exports

pub mod file;
pub mod query;
pub mod stitch;

pub use file::*;
pub use query::*;
pub use stitch::*;

use serde::de::DeserializeOwned;

use crate::server::protocol::{error_codes, Response};

/// Deserialize request params, `T::default()` when none were sent.
/// Malformed params become an `INVALID_PARAMS` response.
fn parse_params<T>(
    id: &Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Result<T, Response>
where
    T: DeserializeOwned + Default,
{
    match params {
        None | Some(serde_json::Value::Null) => Ok(T::default()),
        Some(p) => serde_json::from_value(p).map_err(|e| {
            Response::error(
                id.clone(),
                error_codes::INVALID_PARAMS,
                format!("Invalid params: {}", e),
            )
        }),
    }
}
