//! Pass-through proxy for the F1 statistics upstream.

use crate::api::utils::{json_response, query_param};
use crate::errors::GatewayError;
use crate::http::{fetch_json, upstream_host};
use crate::{AppState, GatewayBody};
use hyper::{Request, Response, StatusCode};
use serde_json::json;
use std::time::Duration;

/// Forwards `?path=...` to the configured upstream and relays the JSON
/// verbatim. Every failure collapses into one fixed 500 body; the detail goes
/// to the log, not the caller.
pub async fn handle(
    state: &AppState,
    req: Request<GatewayBody>,
) -> Result<Response<GatewayBody>, GatewayError> {
    let path = query_param(req.uri(), "path").unwrap_or_default();
    let url = format!("{}{}", state.config.f1.base_url, path);
    let upstream = upstream_host(&url);
    let timeout = Duration::from_secs(state.config.f1.timeout_secs);

    match fetch_json(state.http.get(&url), &upstream, timeout).await {
        Ok(data) => json_response(StatusCode::OK, &data),
        Err(error) => {
            tracing::error!(%error, %url, "f1 upstream request failed");
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({"error": "Failed to fetch F1 data"}),
            )
        }
    }
}
