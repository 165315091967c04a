//! Clients for the three upstream services: blockchain indexing (Alchemy),
//! social graph (Neynar) and Basenames reverse resolution on Base.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

pub mod alchemy;
pub mod basenames;
pub mod neynar;

pub use alchemy::AlchemyClient;
pub use basenames::BasenameResolver;
pub use neynar::NeynarClient;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("config error: {0}")]
    Config(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("http status {status} body={body}")]
    HttpStatus { status: u16, body: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("rpc error: {0}")]
    Rpc(String),
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

pub(crate) fn build_http_client(
    timeout: std::time::Duration,
) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| ProviderError::Config(format!("failed to build http client: {err}")))
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_body() || err.is_decode() {
        return ProviderError::Decode(err.to_string());
    }
    ProviderError::Network(err.to_string())
}

/// Reads the body, turning non-success statuses into `HttpStatus` with the body preserved.
pub(crate) async fn decode_response<T>(
    op: &'static str,
    resp: reqwest::Response,
) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    let status = resp.status();
    let body = resp.text().await.map_err(map_reqwest_error)?;
    if !status.is_success() {
        warn!(operation = op, status = status.as_u16(), body = %body, "non-success status");
        return Err(ProviderError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body)
        .map_err(|err| ProviderError::Decode(format!("{op}: {err}")))
        .inspect(|_| debug!(operation = op, "response decoded"))
}
