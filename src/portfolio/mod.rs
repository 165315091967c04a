//! Holdings aggregation: per-address fan-out to the providers plus the pure
//! reshaping (scoring, intersection, grouping) applied to the merged results.
//!
//! Every fan-out issues all per-address calls at once and waits for all of
//! them. A failing address is logged and contributes nothing (or an error
//! marker); it never fails the aggregate.

use futures::future::join_all;
use tracing::warn;

use crate::models::collectible::Collectible;
use crate::models::names::NameRecord;
use crate::models::token::TokenHolding;
use crate::providers::{AlchemyClient, BasenameResolver};

pub mod addresses;
pub mod balances;
pub mod collectibles;
pub mod valuation;

pub const NAME_LOOKUP_ERROR: &str = "Failed to fetch basename";

/// All NFTs owned by `addresses`, tagged with their owner, scored and sorted highest first.
pub async fn collect_nfts(client: &AlchemyClient, addresses: &[String]) -> Vec<Collectible> {
    let fetches = addresses.iter().map(|address| async move {
        match client.owned_nfts(address).await {
            Ok(nfts) => nfts
                .into_iter()
                .map(|mut nft| {
                    nft.address = Some(address.clone());
                    nft
                })
                .collect(),
            Err(err) => {
                warn!(address = %address, error = %err, "NFT lookup failed");
                Vec::new()
            }
        }
    });

    let merged: Vec<Collectible> = join_all(fetches).await.into_iter().flatten().collect();
    collectibles::score_and_sort(merged)
}

/// Non-zero balances across `addresses`, merged per contract with metadata, largest `top` first.
pub async fn collect_holdings(
    client: &AlchemyClient,
    addresses: &[String],
    top: usize,
) -> Vec<TokenHolding> {
    let fetches = addresses.iter().map(|address| async move {
        match client.token_balances(address).await {
            Ok(result) => balances::non_zero_balances(address, result.token_balances),
            Err(err) => {
                warn!(address = %address, error = %err, "token balance lookup failed");
                Vec::new()
            }
        }
    });
    let owned = join_all(fetches).await.into_iter().flatten().collect();
    let groups = balances::group_balances(owned);

    let lookups = groups.into_iter().map(|group| async move {
        let metadata = client
            .token_metadata(&group.contract_address)
            .await
            .map_err(|err| {
                warn!(
                    contract = %group.contract_address,
                    error = %err,
                    "token metadata lookup failed"
                );
                err.to_string()
            });
        group.into_holding(metadata)
    });
    let holdings = join_all(lookups).await.into_iter().flatten().collect();
    balances::rank_holdings(holdings, top)
}

/// One record per input address, in input order.
pub async fn resolve_names(resolver: &BasenameResolver, addresses: &[String]) -> Vec<NameRecord> {
    let lookups = addresses.iter().map(|address| async move {
        let normalized = addresses::normalize_address(address);
        match resolver.primary_name(&normalized).await {
            Ok(basename) => NameRecord {
                address: normalized,
                basename,
                error: None,
            },
            Err(err) => {
                warn!(address = %address, error = %err, "basename lookup failed");
                NameRecord {
                    address: address.clone(),
                    basename: None,
                    error: Some(NAME_LOOKUP_ERROR.to_string()),
                }
            }
        }
    });
    join_all(lookups).await
}
