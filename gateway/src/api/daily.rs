//! Video room provisioning against the Daily REST API.
//!
//! Rooms are created lazily: look the code up first, create it with the
//! standing call settings if it does not exist, then hand back the join URL.

use crate::api::utils::{json_response, query_param};
use crate::errors::GatewayError;
use crate::http::{fetch_json, upstream_host};
use crate::{AppState, GatewayBody};
use hyper::{Request, Response, StatusCode};
use serde_json::json;
use std::time::Duration;

pub async fn room(
    state: &AppState,
    req: Request<GatewayBody>,
) -> Result<Response<GatewayBody>, GatewayError> {
    let Some(code) = query_param(req.uri(), "code").filter(|c| !c.is_empty()) else {
        return json_response(
            StatusCode::BAD_REQUEST,
            &json!({"error": "Missing room code"}),
        );
    };

    let daily = &state.config.daily;
    let upstream = upstream_host(&daily.api_url);
    let timeout = Duration::from_secs(daily.timeout_secs);

    let lookup_url = format!("{}/rooms/{}", daily.api_url, code);
    let lookup = fetch_json(
        state.http.get(&lookup_url).bearer_auth(&daily.api_key),
        &upstream,
        timeout,
    )
    .await;

    match lookup {
        Ok(_) => {}
        // A non-2xx means the room does not exist yet. Transport failures
        // and timeouts would doom the create call too, so they stop here.
        Err(error @ GatewayError::UpstreamStatus { .. }) => {
            tracing::info!(%error, room = %code, "room not found, creating");
            let payload = json!({
                "name": code,
                "properties": {
                    "enable_chat": true,
                    "enable_screenshare": true,
                    "enable_knocking": false,
                    "start_video_off": true,
                    "start_audio_off": false,
                },
            });
            let create_url = format!("{}/rooms", daily.api_url);
            let created = fetch_json(
                state
                    .http
                    .post(&create_url)
                    .bearer_auth(&daily.api_key)
                    .json(&payload),
                &upstream,
                timeout,
            )
            .await;

            if let Err(error) = created {
                tracing::error!(%error, room = %code, "room creation failed");
                return json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &json!({"error": "Failed to create room"}),
                );
            }
        }
        Err(error) => {
            tracing::error!(%error, room = %code, "room lookup failed");
            return json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({"error": "Failed to create room"}),
            );
        }
    }

    json_response(
        StatusCode::OK,
        &json!({"url": format!("https://{}/{}", daily.domain, code)}),
    )
}
