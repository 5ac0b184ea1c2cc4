//! Mapping of planner errors onto MCP error responses

use rmcp::ErrorData;
use trellis_core::PlannerError;

/// Converts a planner error into an MCP error, prefixed with `message`.
///
/// Rejected input is reported as `invalid_params` so the client can correct
/// the request; everything else is an internal error.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    if error.is_invalid_input() {
        ErrorData::invalid_params(text, None)
    } else {
        ErrorData::internal_error(text, None)
    }
}
