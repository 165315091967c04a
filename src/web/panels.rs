//! Fragment endpoints that fill a page's `loading` panels.
//!
//! Each `render_*` function draws one panel in any of its three states, so
//! pages use it for the initial placeholder and the handlers here use it for
//! the result.

use axum::extract::{Query, State};
use axum::response::Html;
use maud::{Markup, html};
use serde::Deserialize;

use crate::http::{ALCHEMY_KEY_MISSING, NEYNAR_KEY_MISSING};
use crate::models::collectible::{Collectible, CollectionComparison};
use crate::models::identity::FarcasterUser;
use crate::models::names::NameRecord;
use crate::models::token::TokenHolding;
use crate::portfolio::addresses::parse_address_list;
use crate::portfolio::{self, collectibles};
use crate::state::AppState;

use super::components::holdings::{name_list, token_list};
use super::components::nft::{feature_card, nft_detail, nft_grid};
use super::components::panel::Panel;
use super::components::profile::user_list;
use super::links::{self, SearchTarget};

pub const NO_ADDRESSES: &str = "No Ethereum addresses found for this user";
pub const NO_COMPARE_ADDRESSES: &str = "One or both users have no Ethereum addresses";

#[derive(Debug, Deserialize)]
pub struct AddressesQuery {
    addresses: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    addresses: Option<String>,
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    addresses: Option<String>,
    key: Option<String>,
    back: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    addresses1: Option<String>,
    addresses2: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
    #[serde(rename = "for")]
    target: Option<String>,
    fid1: Option<u64>,
}

fn addresses_of(raw: Option<&str>) -> Vec<String> {
    raw.map(parse_address_list).unwrap_or_default()
}

/// Zero-based gallery page; a blank or absent value is the first page.
fn parse_page(raw: Option<&str>) -> Result<usize, String> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(0),
        Some(value) => value
            .parse()
            .map_err(|_| format!("Invalid page parameter: {value}")),
    }
}

fn fragment(markup: Markup) -> Html<String> {
    Html(markup.into_string())
}

pub fn render_search(panel: &Panel<Vec<FarcasterUser>>, target: &SearchTarget) -> Markup {
    panel.render("search", "Searching...", |users| user_list(users, target))
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Html<String> {
    let target = match (query.target.as_deref(), query.fid1) {
        (Some("compare"), Some(fid1)) => SearchTarget::CompareSecond(fid1),
        (Some("compare"), None) => SearchTarget::CompareFirst,
        _ => SearchTarget::Profile,
    };
    let q = query.q.unwrap_or_default();
    let panel = if q.trim().is_empty() {
        Panel::Error("Missing search query".to_string())
    } else {
        match &state.neynar {
            None => Panel::Error(NEYNAR_KEY_MISSING.to_string()),
            Some(client) => client.search_users(q.trim()).await.into(),
        }
    };
    fragment(render_search(&panel, &target))
}

pub fn render_tokens(panel: &Panel<Vec<TokenHolding>>) -> Markup {
    panel.render("tokens", "Loading token balances...", |tokens| token_list(tokens))
}

pub async fn tokens(
    State(state): State<AppState>,
    Query(query): Query<AddressesQuery>,
) -> Html<String> {
    let addresses = addresses_of(query.addresses.as_deref());
    let panel = match (&state.alchemy, addresses.is_empty()) {
        (_, true) => Panel::Error(NO_ADDRESSES.to_string()),
        (None, _) => Panel::Error(ALCHEMY_KEY_MISSING.to_string()),
        (Some(client), false) => Panel::Ready(
            portfolio::collect_holdings(client, &addresses, state.limits.top_tokens).await,
        ),
    };
    fragment(render_tokens(&panel))
}

pub fn render_names(panel: &Panel<Vec<NameRecord>>) -> Markup {
    panel.render("names", "Loading basenames...", |records| name_list(records))
}

pub async fn names(
    State(state): State<AppState>,
    Query(query): Query<AddressesQuery>,
) -> Html<String> {
    let addresses = addresses_of(query.addresses.as_deref());
    let panel = if addresses.is_empty() {
        Panel::Error(NO_ADDRESSES.to_string())
    } else {
        Panel::Ready(portfolio::resolve_names(&state.names, &addresses).await)
    };
    fragment(render_names(&panel))
}

pub fn render_best_nft(panel: &Panel<Option<Collectible>>) -> Markup {
    panel.render("best-nft", "Loading NFT data...", |best| match best {
        Some(nft) => feature_card(nft),
        None => html! { p class="muted" { "No NFTs found for this user." } },
    })
}

pub async fn best_nft(
    State(state): State<AppState>,
    Query(query): Query<AddressesQuery>,
) -> Html<String> {
    let addresses = addresses_of(query.addresses.as_deref());
    let panel = match (&state.alchemy, addresses.is_empty()) {
        (_, true) => Panel::Error(NO_ADDRESSES.to_string()),
        (None, _) => Panel::Error(ALCHEMY_KEY_MISSING.to_string()),
        (Some(client), false) => {
            let sorted = portfolio::collect_nfts(client, &addresses).await;
            Panel::Ready(sorted.into_iter().next())
        }
    };
    fragment(render_best_nft(&panel))
}

/// One page of an identity's collection.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryPage {
    pub addresses: Vec<String>,
    pub items: Vec<Collectible>,
    pub total: usize,
    pub page: usize,
    pub pages: usize,
}

pub fn render_gallery(panel: &Panel<GalleryPage>) -> Markup {
    panel.render("gallery", "Loading NFT collection...", |gallery| {
        let back = links::gallery_panel(&gallery.addresses, gallery.page);
        html! {
            @if gallery.total == 0 {
                p class="muted" { "No NFTs found on Base mainnet for this user." }
            } @else {
                h3 { "NFT Collection (" (gallery.total) " total)" }
                (nft_grid(&gallery.items, |nft| links::nft_panel(&gallery.addresses, &nft.key(), &back)))
                @if gallery.pages > 1 {
                    div class="pager" {
                        @if gallery.page > 0 {
                            a href=(links::gallery_panel(&gallery.addresses, gallery.page - 1)) data-panel-link { "← Previous" }
                        }
                        span class="muted" { "Page " (gallery.page + 1) " of " (gallery.pages) }
                        @if gallery.page + 1 < gallery.pages {
                            a href=(links::gallery_panel(&gallery.addresses, gallery.page + 1)) data-panel-link { "Next →" }
                        }
                    }
                }
            }
        }
    })
}

pub async fn gallery(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> Html<String> {
    let addresses = addresses_of(query.addresses.as_deref());
    let requested = parse_page(query.page.as_deref());
    let panel = match (&state.alchemy, addresses.is_empty(), requested) {
        (_, true, _) => Panel::Error(NO_ADDRESSES.to_string()),
        (_, _, Err(message)) => Panel::Error(message),
        (None, _, _) => Panel::Error(ALCHEMY_KEY_MISSING.to_string()),
        (Some(client), false, Ok(requested)) => {
            let sorted = portfolio::collect_nfts(client, &addresses).await;
            let page_size = state.limits.gallery_page_size;
            let pages = sorted.len().div_ceil(page_size);
            let page = requested.min(pages.saturating_sub(1));
            let (items, pages) = collectibles::page_of(&sorted, page, page_size);
            Panel::Ready(GalleryPage {
                items: items.to_vec(),
                total: sorted.len(),
                addresses,
                page,
                pages,
            })
        }
    };
    fragment(render_gallery(&panel))
}

/// Detail view of one item, drawn inside the panel the `back` link returns to.
pub async fn nft(State(state): State<AppState>, Query(query): Query<DetailQuery>) -> Html<String> {
    let addresses = addresses_of(query.addresses.as_deref());
    let back = query
        .back
        .filter(|back| back.starts_with("/panels/"))
        .unwrap_or_else(|| links::gallery_panel(&addresses, 0));
    let (name, back_label) = if back.starts_with("/panels/compare") {
        ("compare", "Back to common NFTs")
    } else {
        ("gallery", "Back to gallery")
    };

    let panel: Panel<Collectible> = match (&state.alchemy, addresses.is_empty(), query.key) {
        (_, true, _) => Panel::Error(NO_ADDRESSES.to_string()),
        (_, _, None) => Panel::Error("Missing NFT key".to_string()),
        (None, _, _) => Panel::Error(ALCHEMY_KEY_MISSING.to_string()),
        (Some(client), false, Some(key)) => {
            portfolio::collect_nfts(client, &addresses)
                .await
                .into_iter()
                .find(|nft| nft.key().eq_ignore_ascii_case(key.trim()))
                .map(Panel::Ready)
                .unwrap_or_else(|| Panel::Error("NFT not found".to_string()))
        }
    };
    fragment(panel.render(name, "Loading NFT...", |nft| {
        nft_detail(nft, &back, back_label)
    }))
}

/// Comparison plus the addresses it was computed for, needed for detail links.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub addresses1: Vec<String>,
    pub addresses2: Vec<String>,
    pub comparison: CollectionComparison,
}

pub fn render_compare(panel: &Panel<ComparisonView>) -> Markup {
    panel.render("compare", "Comparing collections...", |view| {
        let comparison = &view.comparison;
        let back = links::compare_panel(&view.addresses1, &view.addresses2);
        html! {
            div style="text-align:center;margin-bottom:16px" {
                span class="pill" { (comparison.common_total) " NFTs in common" }
                div class="muted" style="font-size:12px;margin-top:4px" {
                    "First user owns " (comparison.user1_total) " NFTs • "
                    "second user owns " (comparison.user2_total) " NFTs"
                }
            }
            @if comparison.common_nfts.is_empty() {
                p class="muted" style="text-align:center" { "These users don't have any NFTs in common" }
            } @else {
                h3 { "Common NFTs" }
                (nft_grid(&comparison.common_nfts, |nft| links::nft_panel(&view.addresses1, &nft.key(), &back)))
            }
        }
    })
}

pub async fn compare(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Html<String> {
    let addresses1 = addresses_of(query.addresses1.as_deref());
    let addresses2 = addresses_of(query.addresses2.as_deref());
    let panel = match &state.alchemy {
        _ if addresses1.is_empty() || addresses2.is_empty() => {
            Panel::Error(NO_COMPARE_ADDRESSES.to_string())
        }
        None => Panel::Error(ALCHEMY_KEY_MISSING.to_string()),
        Some(client) => {
            let (user1, user2) = futures::join!(
                portfolio::collect_nfts(client, &addresses1),
                portfolio::collect_nfts(client, &addresses2),
            );
            Panel::Ready(ComparisonView {
                comparison: collectibles::build_comparison(
                    user1,
                    user2,
                    state.limits.compare_default,
                ),
                addresses1,
                addresses2,
            })
        }
    };
    fragment(render_compare(&panel))
}
