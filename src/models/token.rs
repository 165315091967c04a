use serde::{Deserialize, Serialize};

/// Raw `alchemy_getTokenBalances` result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalancesResult {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub token_balances: Vec<TokenBalanceRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceRecord {
    pub contract_address: String,
    #[serde(default)]
    pub token_balance: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// `alchemy_getTokenMetadata` result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct TokenMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub decimals: Option<u32>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Non-zero balance of one address for one contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedBalance {
    pub contract_address: String,
    pub token_balance: String,
    pub owner: String,
}

/// A contract's balance merged across every address that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenHolding {
    pub contract_address: String,
    pub token_balance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// First address the balance was seen on.
    pub address: String,
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenHoldingsResponse {
    pub tokens: Vec<TokenHolding>,
}
