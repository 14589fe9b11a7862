//! Upstream call helpers.
//!
//! Single attempt, fail fast: no retries, a bounded wait per call, and every
//! failure mode (transport error, timeout, non-2xx, malformed body) mapped to
//! its own `GatewayError` variant.

use crate::errors::GatewayError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Upstream identifier for error messages: the host when the URL parses,
/// the raw string otherwise.
pub fn upstream_host(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

fn classify(upstream: &str, error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::UpstreamTimeout(upstream.to_owned())
    } else {
        GatewayError::UpstreamRequestFailed(upstream.to_owned(), error.to_string())
    }
}

/// Sends the request and decodes the response as JSON.
///
/// The timeout covers the whole request/response cycle including body
/// collection. Non-2xx statuses are errors; use the raw client for calls
/// where they carry meaning.
pub async fn fetch_json(
    builder: reqwest::RequestBuilder,
    upstream: &str,
    timeout: Duration,
) -> Result<Value, GatewayError> {
    let response = builder
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| classify(upstream, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GatewayError::UpstreamStatus {
            upstream: upstream.to_owned(),
            status: status.as_u16(),
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| GatewayError::ResponseBody(upstream.to_owned(), e.to_string()))
}

/// Like [`fetch_json`] but deserializes into a concrete type.
pub async fn fetch_typed<T: DeserializeOwned>(
    builder: reqwest::RequestBuilder,
    upstream: &str,
    timeout: Duration,
) -> Result<T, GatewayError> {
    let value = fetch_json(builder, upstream, timeout).await?;
    serde_json::from_value(value)
        .map_err(|e| GatewayError::ResponseBody(upstream.to_owned(), e.to_string()))
}
