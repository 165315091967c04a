use std::collections::HashMap;
use std::str::FromStr;

use alloy_primitives::U256;

use crate::models::token::{OwnedBalance, TokenBalanceRecord, TokenHolding, TokenMetadata};

pub const METADATA_ERROR: &str = "Failed to fetch token metadata";
const DISPLAY_FRACTION_DIGITS: usize = 6;

/// Parses a provider balance (`0x`-prefixed hex or decimal) as a 256-bit integer.
pub fn parse_balance(raw: &str) -> Option<U256> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "0x" {
        return None;
    }
    U256::from_str(trimmed).ok()
}

/// Keeps the records with a readable, non-zero balance and tags them with their owner.
pub fn non_zero_balances(owner: &str, records: Vec<TokenBalanceRecord>) -> Vec<OwnedBalance> {
    records
        .into_iter()
        .filter_map(|record| {
            let raw = record.token_balance?;
            let value = parse_balance(&raw)?;
            (!value.is_zero()).then(|| OwnedBalance {
                contract_address: record.contract_address,
                token_balance: raw,
                owner: owner.to_string(),
            })
        })
        .collect()
}

/// Balances of one contract across every address, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceGroup {
    pub contract_address: String,
    pub records: Vec<OwnedBalance>,
}

impl BalanceGroup {
    pub fn owners(&self) -> Vec<String> {
        self.records.iter().map(|record| record.owner.clone()).collect()
    }

    /// Merges metadata onto the first record; a failed lookup leaves an error marker instead.
    /// `None` only for a group with no records.
    pub fn into_holding(self, metadata: Result<TokenMetadata, String>) -> Option<TokenHolding> {
        let addresses = self.owners();
        let first = self.records.into_iter().next()?;

        let mut holding = TokenHolding {
            contract_address: self.contract_address,
            token_balance: first.token_balance,
            name: None,
            symbol: None,
            logo: None,
            decimals: None,
            error: None,
            address: first.owner,
            addresses,
        };
        match metadata {
            Ok(meta) => {
                holding.name = meta.name;
                holding.symbol = meta.symbol;
                holding.logo = meta.logo;
                holding.decimals = meta.decimals;
            }
            Err(_) => holding.error = Some(METADATA_ERROR.to_string()),
        }
        Some(holding)
    }
}

pub fn group_balances(balances: Vec<OwnedBalance>) -> Vec<BalanceGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<BalanceGroup> = Vec::new();
    for balance in balances {
        match index.get(&balance.contract_address) {
            Some(&slot) => groups[slot].records.push(balance),
            None => {
                index.insert(balance.contract_address.clone(), groups.len());
                groups.push(BalanceGroup {
                    contract_address: balance.contract_address.clone(),
                    records: vec![balance],
                });
            }
        }
    }
    groups
}

/// Largest raw balances first, truncated to `top`.
pub fn rank_holdings(mut holdings: Vec<TokenHolding>, top: usize) -> Vec<TokenHolding> {
    holdings.sort_by(|a, b| {
        let left = parse_balance(&a.token_balance).unwrap_or(U256::ZERO);
        let right = parse_balance(&b.token_balance).unwrap_or(U256::ZERO);
        right.cmp(&left)
    });
    holdings.truncate(top);
    holdings
}

/// Decimal-aware rendering of a raw balance, cut to six fractional digits.
/// `None` when the balance or the decimal count is unknown.
pub fn format_units(raw: &str, decimals: Option<u32>) -> Option<String> {
    let decimals = usize::try_from(decimals?).ok()?;
    let digits = parse_balance(raw)?.to_string();
    if decimals == 0 {
        return Some(digits);
    }

    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction[..fraction.len().min(DISPLAY_FRACTION_DIGITS)].trim_end_matches('0');
    if fraction.is_empty() {
        Some(whole.to_string())
    } else {
        Some(format!("{whole}.{fraction}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(contract: &str, balance: Option<&str>) -> TokenBalanceRecord {
        TokenBalanceRecord {
            contract_address: contract.to_string(),
            token_balance: balance.map(str::to_string),
            error: None,
        }
    }

    fn owned(contract: &str, balance: &str, owner: &str) -> OwnedBalance {
        OwnedBalance {
            contract_address: contract.to_string(),
            token_balance: balance.to_string(),
            owner: owner.to_string(),
        }
    }

    fn holding(contract: &str, balance: &str) -> TokenHolding {
        group_balances(vec![owned(contract, balance, "0xowner")])
            .remove(0)
            .into_holding(Ok(TokenMetadata::default()))
            .unwrap()
    }

    #[test]
    fn zero_and_unreadable_balances_are_dropped() {
        let kept = non_zero_balances(
            "0xowner",
            vec![
                record("0x1", Some("0x0")),
                record("0x2", Some("0x0000000000000000000000000000000000000000000000000000000000000000")),
                record("0x3", None),
                record("0x4", Some("0x")),
                record("0x5", Some("0x01")),
            ],
        );
        assert_eq!(kept, vec![owned("0x5", "0x01", "0xowner")]);
    }

    #[test]
    fn grouping_merges_owners_in_first_seen_order() {
        let groups = group_balances(vec![
            owned("0xT1", "0x05", "0xa"),
            owned("0xT2", "0x01", "0xa"),
            owned("0xT1", "0x09", "0xb"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].contract_address, "0xT1");
        assert_eq!(groups[0].owners(), vec!["0xa", "0xb"]);

        let holding = groups[0].clone().into_holding(Ok(TokenMetadata {
            name: Some("Token".to_string()),
            symbol: Some("TKN".to_string()),
            decimals: Some(18),
            logo: None,
        }))
        .unwrap();
        assert_eq!(holding.token_balance, "0x05");
        assert_eq!(holding.address, "0xa");
        assert_eq!(holding.addresses, vec!["0xa", "0xb"]);
        assert_eq!(holding.symbol.as_deref(), Some("TKN"));
        assert!(holding.error.is_none());
    }

    #[test]
    fn failed_metadata_leaves_error_marker() {
        let holding = group_balances(vec![owned("0xT1", "0x05", "0xa")])
            .remove(0)
            .into_holding(Err("rpc down".to_string()))
            .unwrap();
        assert_eq!(holding.error.as_deref(), Some(METADATA_ERROR));
        assert!(holding.name.is_none());
        assert_eq!(holding.token_balance, "0x05");
    }

    #[test]
    fn ranking_compares_full_width_integers() {
        let big = format!("0x{}", "f".repeat(60));
        let ranked = rank_holdings(
            vec![
                holding("0x1", "0x10"),
                holding("0x2", &big),
                holding("0x3", "0xff"),
                holding("0x4", "0x01"),
                holding("0x5", "0x02"),
                holding("0x6", "0x03"),
            ],
            5,
        );
        let contracts: Vec<&str> = ranked.iter().map(|h| h.contract_address.as_str()).collect();
        assert_eq!(contracts, vec!["0x2", "0x3", "0x1", "0x6", "0x5"]);
    }

    #[test]
    fn units_are_formatted_and_truncated() {
        // 1.5 * 10^18
        assert_eq!(format_units("0x14d1120d7b160000", Some(18)).as_deref(), Some("1.5"));
        // 1234567 with 6 decimals
        assert_eq!(format_units("0x12d687", Some(6)).as_deref(), Some("1.234567"));
        // dust below six fractional digits renders as the whole part
        assert_eq!(format_units("0x1", Some(18)).as_deref(), Some("0"));
        assert_eq!(format_units("0x0f4240", Some(6)).as_deref(), Some("1"));
        assert_eq!(format_units("0x07", Some(0)).as_deref(), Some("7"));
        assert_eq!(format_units("0x07", None), None);
    }
}
