use std::time::Duration;

use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::AlchemyConfig;
use crate::models::collectible::Collectible;
use crate::models::token::{TokenBalancesResult, TokenMetadata};

use super::{ProviderError, build_http_client, decode_response, map_reqwest_error};

/// Blockchain indexing provider: owned NFTs over REST, balances and token metadata over JSON-RPC.
#[derive(Clone)]
pub struct AlchemyClient {
    http: reqwest::Client,
    rpc: HttpClient,
    keyed_root: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnedNftsPage {
    #[serde(default)]
    owned_nfts: Vec<Value>,
}

impl AlchemyClient {
    pub fn new(config: &AlchemyConfig, api_key: &str) -> Result<Self, ProviderError> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::Config("Alchemy API key is empty".to_string()));
        }
        let keyed_root = format!("{}/v2/{}", config.endpoint(), api_key.trim());
        Self::with_endpoint(keyed_root, config.request_timeout())
    }

    fn with_endpoint(keyed_root: String, timeout: Duration) -> Result<Self, ProviderError> {
        let http = build_http_client(timeout)?;
        let rpc = HttpClientBuilder::default()
            .request_timeout(timeout)
            .build(&keyed_root)
            .map_err(|err| ProviderError::Config(format!("failed to build rpc client: {err}")))?;
        Ok(Self {
            http,
            rpc,
            keyed_root,
        })
    }

    /// Every NFT the address owns on the configured network. A missing `ownedNfts`
    /// field is an empty list; individual items that do not decode are skipped.
    pub async fn owned_nfts(&self, owner: &str) -> Result<Vec<Collectible>, ProviderError> {
        let url = format!("{}/getNFTs/", self.keyed_root);
        info!(operation = "get_nfts", owner, "sending request");
        let resp = self
            .http
            .get(&url)
            .query(&[("owner", owner)])
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let page: OwnedNftsPage = decode_response("get_nfts", resp).await?;

        let mut nfts = Vec::with_capacity(page.owned_nfts.len());
        for raw in page.owned_nfts {
            match serde_json::from_value::<Collectible>(raw) {
                Ok(mut nft) => {
                    nft.normalize_identity();
                    nfts.push(nft);
                }
                Err(err) => warn!(owner, error = %err, "skipping undecodable NFT"),
            }
        }
        Ok(nfts)
    }

    pub async fn token_balances(&self, owner: &str) -> Result<TokenBalancesResult, ProviderError> {
        info!(operation = "alchemy_getTokenBalances", owner, "sending request");
        self.rpc
            .request("alchemy_getTokenBalances", rpc_params![owner])
            .await
            .map_err(|err| ProviderError::Rpc(format!("alchemy_getTokenBalances: {err}")))
    }

    pub async fn token_metadata(&self, contract: &str) -> Result<TokenMetadata, ProviderError> {
        info!(operation = "alchemy_getTokenMetadata", contract, "sending request");
        let metadata: Option<TokenMetadata> = self
            .rpc
            .request("alchemy_getTokenMetadata", rpc_params![contract])
            .await
            .map_err(|err| ProviderError::Rpc(format!("alchemy_getTokenMetadata: {err}")))?;
        metadata.ok_or_else(|| ProviderError::Decode("token metadata result was null".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{JsonRpcResponder, alchemy_config};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn owned_nfts_decodes_and_normalizes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/test-key/getNFTs/"))
            .and(query_param("owner", "0xowner"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ownedNfts": [
                    {"contract": {"address": "0xAA"}, "id": {"tokenId": "0x01"}, "title": "One"},
                    {"not_a_contract": true},
                    {"contract": {"address": "0xBB", "name": "Bees"}, "tokenId": "2"}
                ],
                "totalCount": 3
            })))
            .mount(&server)
            .await;

        let client = AlchemyClient::new(&alchemy_config(&server.uri()), "test-key").unwrap();
        let nfts = client.owned_nfts("0xowner").await.unwrap();
        assert_eq!(nfts.len(), 2);
        assert_eq!(nfts[0].token_id, "0x01");
        assert_eq!(nfts[1].contract.name.as_deref(), Some("Bees"));
    }

    #[tokio::test]
    async fn owned_nfts_missing_field_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/test-key/getNFTs/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = AlchemyClient::new(&alchemy_config(&server.uri()), "test-key").unwrap();
        assert!(client.owned_nfts("0xowner").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn owned_nfts_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/test-key/getNFTs/"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let client = AlchemyClient::new(&alchemy_config(&server.uri()), "test-key").unwrap();
        let err = client.owned_nfts("0xowner").await.unwrap_err();
        assert!(matches!(err, ProviderError::HttpStatus { status: 429, .. }));
    }

    #[tokio::test]
    async fn token_calls_go_through_json_rpc() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/test-key"))
            .respond_with(JsonRpcResponder::new(|method, params| match method {
                "alchemy_getTokenBalances" => Ok(json!({
                    "address": params[0],
                    "tokenBalances": [{"contractAddress": "0xT", "tokenBalance": "0x05", "error": null}]
                })),
                "alchemy_getTokenMetadata" => Ok(json!({
                    "name": "Token", "symbol": "TKN", "decimals": 18, "logo": null
                })),
                _ => Err(json!({"code": -32601, "message": "method not found"})),
            }))
            .mount(&server)
            .await;

        let client = AlchemyClient::new(&alchemy_config(&server.uri()), "test-key").unwrap();
        let balances = client.token_balances("0xowner").await.unwrap();
        assert_eq!(balances.address.as_deref(), Some("0xowner"));
        assert_eq!(balances.token_balances[0].token_balance.as_deref(), Some("0x05"));

        let metadata = client.token_metadata("0xT").await.unwrap();
        assert_eq!(metadata.symbol.as_deref(), Some("TKN"));
        assert_eq!(metadata.decimals, Some(18));
    }

    #[tokio::test]
    async fn rpc_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(JsonRpcResponder::new(|_, _| {
                Err(json!({"code": -32000, "message": "boom"}))
            }))
            .mount(&server)
            .await;

        let client = AlchemyClient::new(&alchemy_config(&server.uri()), "test-key").unwrap();
        assert!(matches!(
            client.token_metadata("0xT").await,
            Err(ProviderError::Rpc(_))
        ));
    }

    #[test]
    fn blank_key_is_rejected() {
        let config = alchemy_config("http://127.0.0.1:1");
        assert!(matches!(
            AlchemyClient::new(&config, "  "),
            Err(ProviderError::Config(_))
        ));
    }
}
