//! Primary-name (reverse) resolution against the Basenames L2 resolver.
//!
//! The reverse record for an address lives at the ENS namehash of
//! `{address without 0x, lower-cased}.{coin type}.reverse`, where the coin
//! type is `0x80000000 | chain_id` in upper-case hex (`80002105` on Base).
//! The resolver's `name(bytes32)` view returns an ABI-encoded string; an empty
//! string means the address has no primary name.

use std::str::FromStr;

use alloy_primitives::{Address, B256, U256, keccak256};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use serde_json::json;
use tracing::info;

use crate::config::NamesConfig;

use super::ProviderError;

const NAME_SIGNATURE: &[u8] = b"name(bytes32)";
const EVM_COIN_TYPE_FLAG: u64 = 0x8000_0000;

#[derive(Clone)]
pub struct BasenameResolver {
    rpc: HttpClient,
    resolver: Address,
    chain_id: u64,
}

impl BasenameResolver {
    pub fn new(config: &NamesConfig) -> Result<Self, ProviderError> {
        if config.rpc_url.trim().is_empty() {
            return Err(ProviderError::Config("names rpc_url is empty".to_string()));
        }
        let resolver = Address::from_str(config.resolver_address.trim()).map_err(|err| {
            ProviderError::Config(format!("invalid resolver address: {err}"))
        })?;
        let rpc = HttpClientBuilder::default()
            .request_timeout(config.request_timeout())
            .build(config.rpc_url.trim())
            .map_err(|err| ProviderError::Config(format!("failed to build rpc client: {err}")))?;
        Ok(Self {
            rpc,
            resolver,
            chain_id: config.chain_id,
        })
    }

    /// Primary name for `address`, `None` when no name is registered.
    pub async fn primary_name(&self, address: &str) -> Result<Option<String>, ProviderError> {
        let node = reverse_node(address, self.chain_id)?;
        let mut calldata = keccak256(NAME_SIGNATURE)[..4].to_vec();
        calldata.extend_from_slice(node.as_slice());

        info!(operation = "resolver_name", address, "sending request");
        let call = json!({
            "to": self.resolver.to_string(),
            "data": format!("0x{}", hex::encode(&calldata)),
        });
        let output: String = self
            .rpc
            .request("eth_call", rpc_params![call, "latest"])
            .await
            .map_err(|err| ProviderError::Rpc(format!("eth_call: {err}")))?;
        decode_abi_string(&output)
    }
}

/// `0x80000000 | chain_id` rendered the way reverse records label it.
pub fn coin_type_label(chain_id: u64) -> String {
    format!("{:X}", EVM_COIN_TYPE_FLAG | chain_id)
}

pub fn reverse_node(address: &str, chain_id: u64) -> Result<B256, ProviderError> {
    let parsed = Address::from_str(address.trim())
        .map_err(|err| ProviderError::InvalidAddress(format!("{address}: {err}")))?;
    let label = hex::encode(parsed.as_slice());
    Ok(namehash(&format!(
        "{label}.{}.reverse",
        coin_type_label(chain_id)
    )))
}

/// ENS namehash.
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }
    for label in name.rsplit('.') {
        let mut preimage = [0u8; 64];
        preimage[..32].copy_from_slice(node.as_slice());
        preimage[32..].copy_from_slice(keccak256(label.as_bytes()).as_slice());
        node = keccak256(preimage);
    }
    node
}

/// Decodes a single ABI `string` return value. Empty output or an empty string is `None`.
pub fn decode_abi_string(output: &str) -> Result<Option<String>, ProviderError> {
    let body = output.trim().trim_start_matches("0x");
    let bytes =
        hex::decode(body).map_err(|err| ProviderError::Decode(format!("eth_call output: {err}")))?;
    if bytes.is_empty() {
        return Ok(None);
    }

    let offset = read_word(&bytes, 0)?;
    let length = read_word(&bytes, offset)?;
    let start = offset
        .checked_add(32)
        .ok_or_else(|| ProviderError::Decode("string offset overflow".to_string()))?;
    let end = start
        .checked_add(length)
        .filter(|end| *end <= bytes.len())
        .ok_or_else(|| ProviderError::Decode("string data out of bounds".to_string()))?;

    let text = String::from_utf8(bytes[start..end].to_vec())
        .map_err(|err| ProviderError::Decode(format!("name is not utf-8: {err}")))?;
    Ok(Some(text).filter(|name| !name.is_empty()))
}

fn read_word(bytes: &[u8], at: usize) -> Result<usize, ProviderError> {
    let end = at
        .checked_add(32)
        .filter(|end| *end <= bytes.len())
        .ok_or_else(|| ProviderError::Decode("abi word out of bounds".to_string()))?;
    let word = U256::from_be_slice(&bytes[at..end]);
    usize::try_from(word).map_err(|_| ProviderError::Decode("abi word exceeds usize".to_string()))
}
