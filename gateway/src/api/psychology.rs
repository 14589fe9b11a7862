//! Relays for the two psychology chat backends.
//!
//! The backends are addressed by their well-known ports (8000 research,
//! 10000 resources); anything else is rejected up front, before an upstream
//! call is attempted.

use crate::api::utils::{deserialize_body, json_response, query_param};
use crate::errors::GatewayError;
use crate::http::{fetch_json, upstream_host};
use crate::{AppState, GatewayBody};
use hyper::{Request, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    reset_memory: bool,
}

fn invalid_params() -> Result<Response<GatewayBody>, GatewayError> {
    json_response(
        StatusCode::BAD_REQUEST,
        &json!({"error": "Invalid parameters. Message and port (8000 or 10000) are required."}),
    )
}

pub async fn chat(
    state: &AppState,
    req: Request<GatewayBody>,
) -> Result<Response<GatewayBody>, GatewayError> {
    let body: ChatRequest = match deserialize_body(req.into_body()).await {
        Ok(body) => body,
        Err(error) => {
            tracing::warn!(%error, "malformed psychology chat request body");
            return invalid_params();
        }
    };

    let message = body.message.as_deref().filter(|m| !m.is_empty());
    let backend = body
        .port
        .and_then(|port| state.config.psychology.backend_url(port));
    let (Some(message), Some(backend)) = (message, backend) else {
        return invalid_params();
    };

    let url = format!("{backend}/chat");
    let upstream = upstream_host(&url);
    let timeout = Duration::from_secs(state.config.psychology.chat_timeout_secs);
    let payload = json!({"message": message, "reset_memory": body.reset_memory});

    match fetch_json(state.http.post(&url).json(&payload), &upstream, timeout).await {
        Ok(data) => json_response(StatusCode::OK, &data),
        Err(error) => {
            tracing::error!(%error, %url, "psychology chat request failed");
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({"error": "Chat request failed", "details": error.to_string()}),
            )
        }
    }
}

pub async fn health(
    state: &AppState,
    req: Request<GatewayBody>,
) -> Result<Response<GatewayBody>, GatewayError> {
    let backend = query_param(req.uri(), "port")
        .and_then(|p| p.parse::<u16>().ok())
        .and_then(|port| {
            state
                .config
                .psychology
                .backend_url(port)
                .map(|backend| (port, backend))
        });
    let Some((port, backend)) = backend else {
        return json_response(
            StatusCode::BAD_REQUEST,
            &json!({"error": "Invalid port parameter"}),
        );
    };

    let url = format!("{backend}/health");
    let upstream = upstream_host(&url);
    let timeout = Duration::from_secs(state.config.psychology.health_timeout_secs);

    match fetch_json(state.http.get(&url), &upstream, timeout).await {
        Ok(data) => json_response(StatusCode::OK, &data),
        Err(error) => {
            tracing::error!(%error, %url, "psychology health check failed");
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({
                    "error": "Health check failed",
                    "details": error.to_string(),
                    "port": port,
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::{
        empty_body, json_body, read_json, spawn_stub, spawn_stub_capturing, test_config,
    };
    use hyper::Method;
    use serde_json::Value;

    fn chat_request(body: &Value) -> Request<GatewayBody> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/psychology/chat")
            .body(json_body(body))
            .expect("request")
    }

    fn health_request(query: &str) -> Request<GatewayBody> {
        Request::builder()
            .method(Method::GET)
            .uri(format!("/api/psychology/health{query}"))
            .body(empty_body())
            .expect("request")
    }

    #[tokio::test]
    async fn invalid_port_is_rejected_before_upstream() {
        // No stub is running; a 400 here proves nothing was called.
        let state = AppState::new(test_config("http://127.0.0.1:9"));

        let response = chat(
            &state,
            chat_request(&json!({"message": "hi", "port": 9999})),
        )
        .await
        .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            read_json(response).await,
            json!({"error": "Invalid parameters. Message and port (8000 or 10000) are required."})
        );
    }

    #[tokio::test]
    async fn missing_message_is_400() {
        let state = AppState::new(test_config("http://127.0.0.1:9"));
        let response = chat(&state, chat_request(&json!({"port": 8000})))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_relays_backend_json() {
        let reply = json!({"response": "how does that make you feel?"});
        let (base, mut requests) = spawn_stub_capturing({
            let reply = reply.clone();
            move |_path, _query| (200, reply.clone())
        })
        .await;
        let state = AppState::new(test_config(&base));

        let response = chat(
            &state,
            chat_request(&json!({"message": "hi", "port": 8000, "resetMemory": true})),
        )
        .await
        .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, reply);

        // camelCase in, snake_case out
        let sent = requests.recv().await.expect("captured request");
        assert_eq!(sent.path, "/chat");
        assert_eq!(sent.body, json!({"message": "hi", "reset_memory": true}));
    }

    #[tokio::test]
    async fn chat_upstream_failure_is_500_with_details() {
        let base = spawn_stub(502, json!({"error": "bad gateway"})).await;
        let state = AppState::new(test_config(&base));

        let response = chat(
            &state,
            chat_request(&json!({"message": "hi", "port": 10000})),
        )
        .await
        .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert_eq!(body["error"], "Chat request failed");
        assert!(body["details"].as_str().expect("details").contains("502"));
    }

    #[tokio::test]
    async fn health_invalid_port_is_400() {
        let state = AppState::new(test_config("http://127.0.0.1:9"));

        for query in ["?port=9999", "?port=abc", ""] {
            let response = health(&state, health_request(query))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                read_json(response).await,
                json!({"error": "Invalid port parameter"})
            );
        }
    }

    #[tokio::test]
    async fn health_relays_backend_json() {
        let reply = json!({"status": "ok"});
        let base = spawn_stub(200, reply.clone()).await;
        let state = AppState::new(test_config(&base));

        let response = health(&state, health_request("?port=10000"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, reply);
    }

    #[tokio::test]
    async fn health_failure_carries_port() {
        let state = AppState::new(test_config("http://127.0.0.1:9"));

        let response = health(&state, health_request("?port=8000"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert_eq!(body["error"], "Health check failed");
        assert_eq!(body["port"], 8000);
    }
}
