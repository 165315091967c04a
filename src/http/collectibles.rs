use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::models::collectible::{CollectibleListing, CollectionComparison};
use crate::portfolio::{self, collectibles};
use crate::state::AppState;

use super::{HttpError, parse_limit, require_alchemy, required_addresses};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nft", get(list_collectibles))
        .route("/compare", get(compare_collections))
}

#[derive(Debug, Deserialize)]
struct ListingQuery {
    addresses: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompareQuery {
    addresses1: Option<String>,
    addresses2: Option<String>,
    limit: Option<String>,
}

async fn list_collectibles(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<CollectibleListing>, HttpError> {
    let addresses = required_addresses(query.addresses.as_deref(), "Missing addresses parameter")?;
    let limit = parse_limit(query.limit.as_deref(), state.limits.nft_default)?;
    let client = require_alchemy(&state)?;

    let sorted = portfolio::collect_nfts(client, &addresses).await;
    let listing = collectibles::build_listing(sorted, limit);
    assert!(listing.nfts.len() <= listing.total, "Listing exceeds its total");
    Ok(Json(listing))
}

async fn compare_collections(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<CollectionComparison>, HttpError> {
    const MISSING: &str = "Missing addresses1 or addresses2 parameter";
    let first = required_addresses(query.addresses1.as_deref(), MISSING)?;
    let second = required_addresses(query.addresses2.as_deref(), MISSING)?;
    let limit = parse_limit(query.limit.as_deref(), state.limits.compare_default)?;
    let client = require_alchemy(&state)?;

    let (user1, user2) = futures::join!(
        portfolio::collect_nfts(client, &first),
        portfolio::collect_nfts(client, &second),
    );
    Ok(Json(collectibles::build_comparison(user1, user2, limit)))
}
