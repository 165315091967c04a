use std::collections::HashSet;

use crate::models::collectible::{Collectible, CollectibleListing, CollectionComparison};

use super::valuation::estimated_value;

pub const EMPTY_LISTING_MESSAGE: &str = "No NFTs found for these addresses";

/// Attaches the mock score to every item and orders them highest first.
/// The sort is stable, so equal scores keep fetch order.
pub fn score_and_sort(mut nfts: Vec<Collectible>) -> Vec<Collectible> {
    for nft in &mut nfts {
        nft.estimated_value = Some(estimated_value(&nft.contract.address, &nft.token_id));
    }
    nfts.sort_by(|a, b| score(b).total_cmp(&score(a)));
    nfts
}

fn score(nft: &Collectible) -> f64 {
    nft.estimated_value.unwrap_or(0.0)
}

/// Builds the listing payload from an already scored and sorted list.
pub fn build_listing(sorted: Vec<Collectible>, limit: usize) -> CollectibleListing {
    let total = sorted.len();
    if total == 0 {
        return CollectibleListing {
            nfts: Vec::new(),
            most_expensive_nft: None,
            total,
            message: Some(EMPTY_LISTING_MESSAGE.to_string()),
        };
    }

    let most_expensive_nft = sorted.first().cloned();
    let mut nfts = sorted;
    nfts.truncate(limit);
    assert!(nfts.len() <= limit, "Listing exceeded requested limit");

    CollectibleListing {
        nfts,
        most_expensive_nft,
        total,
        message: None,
    }
}

/// Items of `first` whose (lower-cased contract, token id) key also occurs in `second`.
/// Each key is reported once, in `first`'s order.
pub fn common_collectibles(first: &[Collectible], second: &[Collectible]) -> Vec<Collectible> {
    let second_keys: HashSet<String> = second.iter().map(Collectible::key).collect();
    let mut reported = HashSet::new();
    first
        .iter()
        .filter(|nft| {
            let key = nft.key();
            second_keys.contains(&key) && reported.insert(key)
        })
        .cloned()
        .collect()
}

pub fn build_comparison(
    user1: Vec<Collectible>,
    user2: Vec<Collectible>,
    limit: usize,
) -> CollectionComparison {
    let common = common_collectibles(&user1, &user2);
    let user1_total = user1.len();
    let user2_total = user2.len();
    let common_total = common.len();

    CollectionComparison {
        user1_nfts: truncated(user1, limit),
        user2_nfts: truncated(user2, limit),
        common_nfts: truncated(common, limit),
        user1_total,
        user2_total,
        common_total,
    }
}

fn truncated(mut nfts: Vec<Collectible>, limit: usize) -> Vec<Collectible> {
    nfts.truncate(limit);
    nfts
}

/// Slice of a sorted list for one gallery page, with the total page count.
pub fn page_of(sorted: &[Collectible], page: usize, page_size: usize) -> (&[Collectible], usize) {
    assert!(page_size > 0, "Page size must be positive");
    let pages = sorted.len().div_ceil(page_size);
    let start = page.saturating_mul(page_size).min(sorted.len());
    let end = start.saturating_add(page_size).min(sorted.len());
    (&sorted[start..end], pages)
}
