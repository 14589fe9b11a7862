//! Helpers shared by the handler tests: request/response body shorthands,
//! a canned config, and throwaway upstream stubs on ephemeral ports.

use crate::config::{
    Config, DailyConfig, F1ProxyConfig, Listener, OtfConfig, PsychologyConfig, SpotifyConfig,
};
use crate::GatewayBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::service::service_fn;
use hyper::Response;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use url::Url;

pub fn empty_body() -> GatewayBody {
    Full::new(Bytes::new()).map_err(|e| match e {}).boxed()
}

pub fn json_body(value: &Value) -> GatewayBody {
    let bytes = Bytes::from(serde_json::to_vec(value).expect("serialize body"));
    Full::new(bytes).map_err(|e| match e {}).boxed()
}

pub async fn read_json(response: Response<GatewayBody>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response is JSON")
}

/// Config with every upstream pointed at `base` and the chat password set
/// to "hunter2".
pub fn test_config(base: &str) -> Config {
    Config {
        listener: Listener {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        f1: F1ProxyConfig {
            base_url: base.to_owned(),
            timeout_secs: 5,
        },
        otf: OtfConfig {
            agent_url: Url::parse(&format!("{base}/agent")).expect("agent url"),
            chat_password: "hunter2".to_owned(),
            timeout_secs: 5,
        },
        psychology: PsychologyConfig {
            research_url: base.to_owned(),
            resources_url: base.to_owned(),
            chat_timeout_secs: 5,
            health_timeout_secs: 5,
        },
        spotify: SpotifyConfig {
            client_id: "client-id".to_owned(),
            client_secret: "client-secret".to_owned(),
            refresh_token: "refresh-token".to_owned(),
            token_url: format!("{base}/api/token"),
            api_url: format!("{base}/v1"),
            timeout_secs: 5,
        },
        daily: DailyConfig {
            api_key: "daily-key".to_owned(),
            domain: "calls.test.daily.co".to_owned(),
            api_url: format!("{base}/v1"),
            timeout_secs: 5,
        },
    }
}

/// A request observed by a capturing stub.
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    /// Request body parsed as JSON, `Null` when empty or not JSON.
    pub body: Value,
}

/// Upstream stub answering every request with the same status and body.
pub async fn spawn_stub(status: u16, body: Value) -> String {
    spawn_stub_with(move |_path, _query| (status, body.clone())).await
}

/// Upstream stub routing on `(path, query)` through the given closure.
/// Returns the base URL; the listener lives until the test process exits.
pub async fn spawn_stub_with<F>(respond: F) -> String
where
    F: Fn(&str, &str) -> (u16, Value) + Send + Sync + 'static,
{
    let (base, _requests) = spawn_stub_capturing(respond).await;
    base
}

/// Like [`spawn_stub_with`], but also hands back a channel of the requests
/// the stub received, so a test can assert on what was sent upstream.
pub async fn spawn_stub_capturing<F>(respond: F) -> (String, mpsc::UnboundedReceiver<CapturedRequest>)
where
    F: Fn(&str, &str) -> (u16, Value) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    let respond = Arc::new(respond);
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let respond = respond.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                    let respond = respond.clone();
                    let tx = tx.clone();
                    async move {
                        let (status, body) =
                            respond(req.uri().path(), req.uri().query().unwrap_or(""));
                        let method = req.method().to_string();
                        let path = req.uri().path().to_owned();
                        let received = req
                            .into_body()
                            .collect()
                            .await
                            .map(|collected| collected.to_bytes())
                            .unwrap_or_default();
                        let _ = tx.send(CapturedRequest {
                            method,
                            path,
                            body: serde_json::from_slice(&received).unwrap_or(Value::Null),
                        });
                        let bytes = Bytes::from(serde_json::to_vec(&body).expect("stub body"));
                        let response = Response::builder()
                            .status(status)
                            .header("content-type", "application/json")
                            .body(Full::new(bytes))
                            .expect("stub response");
                        Ok::<_, Infallible>(response)
                    }
                });
                let _ = Builder::new(TokioExecutor::new())
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    (format!("http://{addr}"), rx)
}
