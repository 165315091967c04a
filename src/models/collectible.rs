use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One owned NFT as reported by the indexing provider, plus the fields this service derives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collectible {
    pub contract: ContractInfo,
    #[serde(default)]
    pub token_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_metadata: Option<NftMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NftMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaRef>,
    /// Legacy `id` envelope; folded into `token_id`/`token_type` on ingest.
    #[serde(default, skip_serializing)]
    pub id: Option<TokenIdentity>,
    /// Mock, non-authoritative score. Not a price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_value: Option<f64>,
    /// Owning address the item was fetched for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContractInfo {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NftMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<NftAttribute>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftAttribute {
    #[serde(default)]
    pub trait_type: Option<String>,
    #[serde(default)]
    pub value: Value,
}

impl NftAttribute {
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MediaRef {
    #[serde(default)]
    pub gateway: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenIdentity {
    #[serde(default)]
    pub token_id: Option<String>,
    #[serde(default)]
    pub token_metadata: Option<TokenTypeMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenTypeMetadata {
    #[serde(default)]
    pub token_type: Option<String>,
}

impl Collectible {
    /// Lower-cased contract address joined with the token id.
    pub fn key(&self) -> String {
        format!("{}-{}", self.contract.address.to_lowercase(), self.token_id)
    }

    /// Fills `token_id`/`token_type` from the nested `id` envelope when the flat fields are absent.
    pub fn normalize_identity(&mut self) {
        if let Some(id) = self.id.take() {
            if self.token_id.is_empty() {
                if let Some(token_id) = id.token_id {
                    self.token_id = token_id;
                }
            }
            if self.token_type.is_none() {
                self.token_type = id.token_metadata.and_then(|meta| meta.token_type);
            }
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        self.media
            .first()
            .and_then(|media| media.gateway.as_deref())
            .or_else(|| self.raw_metadata.as_ref().and_then(|m| m.image.as_deref()))
            .or_else(|| self.metadata.as_ref().and_then(|m| m.image.as_deref()))
            .filter(|url| !url.is_empty())
    }

    pub fn display_name(&self) -> String {
        non_empty(self.title.as_deref())
            .or_else(|| non_empty(self.raw_metadata.as_ref().and_then(|m| m.name.as_deref())))
            .or_else(|| non_empty(self.metadata.as_ref().and_then(|m| m.name.as_deref())))
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!(
                    "{} #{}",
                    self.contract.name.as_deref().unwrap_or("NFT"),
                    self.token_id
                )
            })
    }

    pub fn description_text(&self) -> Option<&str> {
        non_empty(self.raw_metadata.as_ref().and_then(|m| m.description.as_deref()))
            .or_else(|| non_empty(self.description.as_deref()))
            .or_else(|| non_empty(self.metadata.as_ref().and_then(|m| m.description.as_deref())))
    }

    pub fn attributes(&self) -> &[NftAttribute] {
        self.raw_metadata
            .as_ref()
            .and_then(|m| m.attributes.as_deref())
            .unwrap_or_default()
    }

    pub fn collection_name(&self) -> &str {
        self.contract.name.as_deref().unwrap_or("Unknown Collection")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectibleListing {
    pub nfts: Vec<Collectible>,
    pub most_expensive_nft: Option<Collectible>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionComparison {
    #[serde(rename = "user1NFTs")]
    pub user1_nfts: Vec<Collectible>,
    #[serde(rename = "user2NFTs")]
    pub user2_nfts: Vec<Collectible>,
    #[serde(rename = "commonNFTs")]
    pub common_nfts: Vec<Collectible>,
    #[serde(rename = "user1Total")]
    pub user1_total: usize,
    #[serde(rename = "user2Total")]
    pub user2_total: usize,
    #[serde(rename = "commonTotal")]
    pub common_total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_id_envelope_is_folded() {
        let mut nft: Collectible = serde_json::from_value(json!({
            "contract": {"address": "0xAbC"},
            "id": {"tokenId": "0x01", "tokenMetadata": {"tokenType": "ERC721"}},
            "timeLastUpdated": "2024-01-01T00:00:00Z"
        }))
        .expect("decodes");
        nft.normalize_identity();
        assert_eq!(nft.token_id, "0x01");
        assert_eq!(nft.token_type.as_deref(), Some("ERC721"));
        assert_eq!(nft.key(), "0xabc-0x01");
        assert!(nft.extra.contains_key("timeLastUpdated"));

        let encoded = serde_json::to_value(&nft).expect("encodes");
        assert!(encoded.get("id").is_none());
        assert_eq!(encoded["tokenId"], "0x01");
        assert_eq!(encoded["timeLastUpdated"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn display_fields_fall_back_in_order() {
        let nft: Collectible = serde_json::from_value(json!({
            "contract": {"address": "0x1", "name": "Punks"},
            "tokenId": "7",
            "metadata": {"image": "ipfs://meta", "description": "from metadata"}
        }))
        .expect("decodes");
        assert_eq!(nft.display_name(), "Punks #7");
        assert_eq!(nft.image_url(), Some("ipfs://meta"));
        assert_eq!(nft.description_text(), Some("from metadata"));

        let titled: Collectible = serde_json::from_value(json!({
            "contract": {"address": "0x1"},
            "tokenId": "8",
            "title": "Eight",
            "media": [{"gateway": "https://img/8.png"}],
            "rawMetadata": {"attributes": [{"trait_type": "Level", "value": 3}]}
        }))
        .expect("decodes");
        assert_eq!(titled.display_name(), "Eight");
        assert_eq!(titled.image_url(), Some("https://img/8.png"));
        assert_eq!(titled.attributes()[0].value_text(), "3");
        assert_eq!(titled.collection_name(), "Unknown Collection");
    }

    #[test]
    fn comparison_uses_wire_field_names() {
        let comparison = CollectionComparison {
            user1_nfts: Vec::new(),
            user2_nfts: Vec::new(),
            common_nfts: Vec::new(),
            user1_total: 2,
            user2_total: 3,
            common_total: 1,
        };
        let encoded = serde_json::to_value(&comparison).expect("encodes");
        assert_eq!(encoded["user1Total"], 2);
        assert_eq!(encoded["commonTotal"], 1);
        assert!(encoded["commonNFTs"].is_array());
    }
}
