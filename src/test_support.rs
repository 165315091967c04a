//! Shared fixtures for tests that talk to mocked upstreams.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::StatusCode;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::{Request, Respond, ResponseTemplate};

use crate::config::{AlchemyConfig, LimitsConfig, NamesConfig, NeynarConfig};
use crate::providers::{AlchemyClient, BasenameResolver, NeynarClient};
use crate::state::AppState;

type RpcHandler = dyn Fn(&str, &Value) -> Result<Value, Value> + Send + Sync;

/// Answers JSON-RPC 2.0 calls, echoing the request id so the client accepts the reply.
pub struct JsonRpcResponder {
    handler: Box<RpcHandler>,
}

impl JsonRpcResponder {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
        }
    }
}

impl Respond for JsonRpcResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let call: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let id = call.get("id").cloned().unwrap_or(Value::Null);
        let method = call.get("method").and_then(Value::as_str).unwrap_or_default();
        let params = call.get("params").cloned().unwrap_or_else(|| json!([]));
        let body = match (self.handler)(method, &params) {
            Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
            Err(error) => json!({"jsonrpc": "2.0", "id": id, "error": error}),
        };
        ResponseTemplate::new(200).set_body_json(body)
    }
}

pub fn alchemy_config(base_url: &str) -> AlchemyConfig {
    AlchemyConfig {
        base_url: Some(base_url.to_string()),
        request_timeout_ms: 2_000,
        ..AlchemyConfig::default()
    }
}

pub fn neynar_config(base_url: &str) -> NeynarConfig {
    NeynarConfig {
        base_url: base_url.to_string(),
        api_key: Some("neynar-key".to_string()),
        request_timeout_ms: 2_000,
    }
}

pub fn names_config(rpc_url: &str) -> NamesConfig {
    NamesConfig {
        rpc_url: rpc_url.to_string(),
        request_timeout_ms: 2_000,
        ..NamesConfig::default()
    }
}

/// ABI encoding of a single `string` return value.
pub fn abi_string(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut encoded = Vec::new();
    encoded.extend_from_slice(&word(32));
    encoded.extend_from_slice(&word(bytes.len() as u64));
    encoded.extend_from_slice(bytes);
    let padding = (32 - bytes.len() % 32) % 32;
    encoded.extend(std::iter::repeat_n(0u8, padding));
    format!("0x{}", hex::encode(encoded))
}

fn word(value: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&value.to_be_bytes());
    out
}

/// State wired to mock upstreams; `None` leaves that provider unconfigured.
/// Name lookups go to an unroutable port; use `state_with_names` to mock them.
pub fn state_for(alchemy_url: Option<&str>, neynar_url: Option<&str>) -> AppState {
    state_with_names(alchemy_url, neynar_url, "http://127.0.0.1:1")
}

pub fn state_with_names(
    alchemy_url: Option<&str>,
    neynar_url: Option<&str>,
    names_url: &str,
) -> AppState {
    let alchemy = alchemy_url.map(|url| AlchemyClient::new(&alchemy_config(url), "key").unwrap());
    let neynar =
        neynar_url.map(|url| NeynarClient::new(&neynar_config(url), "neynar-key").unwrap());
    let names = BasenameResolver::new(&names_config(names_url)).unwrap();
    AppState::new(alchemy, neynar, names, LimitsConfig::default())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get_text(app, uri).await;
    (status, serde_json::from_str(&body).unwrap_or(Value::Null))
}

pub async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let request = axum::http::Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
