//! The upstream API gateway.
//!
//! A single hyper service exposing the portfolio's backend endpoints: the F1
//! statistics proxy, the OTF chat relay, the psychology chat/health relays,
//! the Spotify listening endpoints and Daily.co room management. Handlers
//! are stateless between calls; they share only the immutable config and a
//! pooled HTTP client.

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

#[cfg(test)]
pub mod testutils;

use crate::api::utils::json_response;
use crate::config::Config;
use crate::errors::GatewayError;
use http_body_util::combinators::BoxBody;
use http_body_util::BodyExt;
use hyper::body::{Bytes, Incoming};
use hyper::service::Service;
use hyper::{Method, Request, Response, StatusCode};
use serde_json::json;
use shared::http::run_http_service;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type GatewayBody = BoxBody<Bytes, GatewayError>;

/// Per-process state shared by all handlers.
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

/// Runs the gateway until the listener fails.
pub async fn run(config: Config) -> Result<(), GatewayError> {
    let listener = config.listener.clone();
    let service = GatewayService {
        state: Arc::new(AppState::new(config)),
    };
    run_http_service(&listener.host, listener.port, service).await
}

#[derive(Clone)]
pub struct GatewayService {
    state: Arc<AppState>,
}

impl GatewayService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl Service<Request<Incoming>> for GatewayService {
    type Response = Response<GatewayBody>;
    type Error = GatewayError;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let state = self.state.clone();
        Box::pin(async move {
            let req = req.map(|body| {
                body.map_err(|e| GatewayError::Hyper(e.to_string())).boxed()
            });
            match dispatch(&state, req).await {
                Ok(response) => Ok(response),
                // Last-resort conversion; handlers normally produce their own
                // structured error responses.
                Err(error) => {
                    tracing::error!(%error, "handler failed");
                    json_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        &json!({"error": "Internal server error"}),
                    )
                }
            }
        })
    }
}

async fn dispatch(
    state: &AppState,
    req: Request<GatewayBody>,
) -> Result<Response<GatewayBody>, GatewayError> {
    match (req.method(), req.uri().path()) {
        (&Method::GET, "/api/f1") => api::f1_proxy::handle(state, req).await,
        (&Method::POST, "/api/otf-chat") => api::otf_chat::handle(state, req).await,
        (&Method::POST, "/api/psychology/chat") => api::psychology::chat(state, req).await,
        (&Method::GET, "/api/psychology/health") => api::psychology::health(state, req).await,
        (&Method::GET, "/api/spotify/recently-played") => {
            api::spotify::recently_played(state).await
        }
        (&Method::GET, "/api/spotify/top-tracks") => api::spotify::top_tracks(state).await,
        (&Method::GET, "/api/call/room") => api::daily::room(state, req).await,
        _ => {
            tracing::debug!(method = %req.method(), path = %req.uri().path(), "no route matched");
            json_response(StatusCode::NOT_FOUND, &json!({"error": "Not found"}))
        }
    }
}
