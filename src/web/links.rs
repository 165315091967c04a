//! URL builders for pages and panel fragments.

use urlencoding::encode;

use crate::portfolio::addresses::join_addresses;

pub fn profile(fid: u64) -> String {
    format!("/profile/{fid}")
}

pub fn compare(fid1: u64, fid2: u64) -> String {
    format!("/compare?fid1={fid1}&fid2={fid2}")
}

pub fn compare_with(fid1: u64) -> String {
    format!("/compare?fid1={fid1}")
}

pub fn search_panel(query: &str, target: &SearchTarget) -> String {
    let base = format!("/panels/search?q={}", encode(query));
    match target {
        SearchTarget::Profile => base,
        SearchTarget::CompareFirst => format!("{base}&for=compare"),
        SearchTarget::CompareSecond(fid1) => format!("{base}&for=compare&fid1={fid1}"),
    }
}

/// Where a search result links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    Profile,
    CompareFirst,
    CompareSecond(u64),
}

impl SearchTarget {
    pub fn href(&self, fid: u64) -> String {
        match self {
            Self::Profile => profile(fid),
            Self::CompareFirst => compare_with(fid),
            Self::CompareSecond(fid1) => compare(*fid1, fid),
        }
    }
}

fn with_addresses(path: &str, addresses: &[String]) -> String {
    format!("{path}?addresses={}", encode(&join_addresses(addresses)))
}

pub fn tokens_panel(addresses: &[String]) -> String {
    with_addresses("/panels/tokens", addresses)
}

pub fn names_panel(addresses: &[String]) -> String {
    with_addresses("/panels/names", addresses)
}

pub fn best_nft_panel(addresses: &[String]) -> String {
    with_addresses("/panels/best-nft", addresses)
}

pub fn gallery_panel(addresses: &[String], page: usize) -> String {
    format!("{}&page={page}", with_addresses("/panels/gallery", addresses))
}

pub fn nft_panel(addresses: &[String], key: &str, back: &str) -> String {
    format!(
        "{}&key={}&back={}",
        with_addresses("/panels/nft", addresses),
        encode(key),
        encode(back)
    )
}

pub fn compare_panel(addresses1: &[String], addresses2: &[String]) -> String {
    format!(
        "/panels/compare?addresses1={}&addresses2={}",
        encode(&join_addresses(addresses1)),
        encode(&join_addresses(addresses2))
    )
}

pub fn basescan(address: &str) -> String {
    format!("https://basescan.org/address/{address}")
}

pub fn etherscan(address: &str) -> String {
    format!("https://etherscan.io/address/{address}")
}

pub fn x_profile(username: &str) -> String {
    format!("https://x.com/{}", encode(username))
}
