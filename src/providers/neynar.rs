use serde_json::Value;
use tracing::info;

use crate::config::NeynarConfig;
use crate::models::identity::{BulkUsersResponse, FarcasterUser, UserSearchResponse};

use super::{ProviderError, build_http_client, decode_response, map_reqwest_error};

const API_KEY_HEADER: &str = "x-api-key";

/// Farcaster social-graph provider.
#[derive(Clone)]
pub struct NeynarClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NeynarClient {
    pub fn new(config: &NeynarConfig, api_key: &str) -> Result<Self, ProviderError> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::Config("Neynar API key is empty".to_string()));
        }
        if config.base_url.trim().is_empty() {
            return Err(ProviderError::Config("Neynar base_url is empty".to_string()));
        }
        Ok(Self {
            http: build_http_client(config.request_timeout())?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Raw user search body, relayed as-is by the search endpoint.
    pub async fn search_raw(&self, query: &str) -> Result<Value, ProviderError> {
        info!(operation = "user_search", query, "sending request");
        let resp = self
            .http
            .get(self.join("/v2/farcaster/user/search"))
            .query(&[("q", query)])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_response("user_search", resp).await
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<FarcasterUser>, ProviderError> {
        let raw = self.search_raw(query).await?;
        let parsed: UserSearchResponse = serde_json::from_value(raw)
            .map_err(|err| ProviderError::Decode(format!("user_search: {err}")))?;
        Ok(parsed.result.users)
    }

    pub async fn users_by_fid(&self, fids: &[u64]) -> Result<Vec<FarcasterUser>, ProviderError> {
        let joined = fids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        info!(operation = "user_bulk", fids = %joined, "sending request");
        let resp = self
            .http
            .get(self.join("/v2/farcaster/user/bulk"))
            .query(&[("fids", joined.as_str())])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let parsed: BulkUsersResponse = decode_response("user_bulk", resp).await?;
        Ok(parsed.users)
    }

    pub async fn user(&self, fid: u64) -> Result<Option<FarcasterUser>, ProviderError> {
        let users = self.users_by_fid(&[fid]).await?;
        Ok(users.into_iter().find(|user| user.fid == fid))
    }
}
