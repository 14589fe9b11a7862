//! Chat relay for the OTF agent.
//!
//! The client holds the password and sends it with every message; nothing is
//! kept server-side between calls. The agent speaks a JSON-RPC-shaped
//! protocol and has answered in two different result shapes over time, so
//! reply extraction tries both before giving up.

use crate::api::utils::{deserialize_body, json_response};
use crate::errors::GatewayError;
use crate::{AppState, GatewayBody};
use hyper::{Request, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

const FALLBACK_REPLY: &str = "Sorry, no response.";

pub async fn handle(
    state: &AppState,
    req: Request<GatewayBody>,
) -> Result<Response<GatewayBody>, GatewayError> {
    // Fields are validated individually so that a wrong-typed `message`
    // still reports "Message is required." rather than a body parse error.
    let body: Value = match deserialize_body(req.into_body()).await {
        Ok(body) => body,
        Err(error) => {
            tracing::warn!(%error, "malformed otf chat request body");
            return json_response(
                StatusCode::BAD_REQUEST,
                &json!({"error": "Invalid request body."}),
            );
        }
    };

    let password = body.get("password").and_then(Value::as_str);
    if password != Some(state.config.otf.chat_password.as_str()) {
        return json_response(StatusCode::UNAUTHORIZED, &json!({"error": "Unauthorized"}));
    }

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty());
    let Some(message) = message else {
        return json_response(
            StatusCode::BAD_REQUEST,
            &json!({"error": "Message is required."}),
        );
    };

    let id = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .to_string();
    let payload = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tasks/send",
        "params": {
            "id": id,
            "message": {
                "role": "user",
                "parts": [{ "type": "text", "text": message }],
            },
        },
    });

    let timeout = Duration::from_secs(state.config.otf.timeout_secs);
    // The agent reports its own failures inside the JSON-RPC envelope, so the
    // HTTP status is not checked; only transport or decode failures are fatal.
    let result: Result<Value, reqwest::Error> = async {
        let response = state
            .http
            .post(state.config.otf.agent_url.clone())
            .json(&payload)
            .timeout(timeout)
            .send()
            .await?;
        response.json::<Value>().await
    }
    .await;

    match result {
        Ok(data) => {
            let ai_text = extract_reply(&data).unwrap_or(FALLBACK_REPLY);
            json_response(StatusCode::OK, &json!({"aiText": ai_text, "raw": data}))
        }
        Err(error) => {
            tracing::error!(%error, "otf agent request failed");
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({"error": "Failed to contact OTF agent."}),
            )
        }
    }
}

/// Reply text from either known agent response shape.
fn extract_reply(data: &Value) -> Option<&str> {
    let result = data.get("result")?;
    result
        .pointer("/artifacts/0/parts/0/text")
        .or_else(|| result.pointer("/message/parts/0/text"))
        .and_then(Value::as_str)
}
