use maud::{Markup, html};

use crate::models::collectible::Collectible;

/// Label attached wherever the score is shown.
pub const VALUE_LABEL: &str = "mock estimate";

fn image(nft: &Collectible, placeholder: &str) -> Markup {
    html! {
        @match nft.image_url() {
            Some(url) => { img class="nft-image" src=(url) alt=(nft.display_name()); }
            None => { div class="nft-image" { span class="muted" { (placeholder) } } }
        }
    }
}

fn value_badge(nft: &Collectible) -> Markup {
    html! {
        @if let Some(value) = nft.estimated_value {
            span class="value" title="Deterministic placeholder score, not a market price" {
                "~" (format!("{value:.2}")) " ETH "
                span class="muted" style="font-size:12px" { "(" (VALUE_LABEL) ")" }
            }
        }
    }
}

/// Shortened owner address, `0x1234...abcd`.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Highlighted single item, used for the most valuable NFT.
pub fn feature_card(nft: &Collectible) -> Markup {
    html! {
        div class="card feature" {
            (image(nft, "No Image Available"))
            h3 { (nft.display_name()) }
            @if let Some(description) = nft.description_text() {
                p class="muted" { (description) }
            }
            div style="display:flex;justify-content:space-between;align-items:flex-end;gap:12px" {
                div class="muted" style="font-size:12px" {
                    @if let Some(collection) = &nft.contract.name {
                        div { "Collection: " (collection) }
                    }
                    div { "Token ID: " (nft.token_id) }
                    @if let Some(owner) = &nft.address {
                        div { "Owned by: " (short_address(owner)) }
                    }
                }
                (value_badge(nft))
            }
        }
    }
}

/// Grid of thumbnails; `href` gives the in-panel detail link for each item.
pub fn nft_grid(nfts: &[Collectible], href: impl Fn(&Collectible) -> String) -> Markup {
    html! {
        div class="grid" {
            @for nft in nfts {
                a class="nft-card" href=(href(nft)) data-panel-link {
                    (image(nft, "No Image"))
                    div style="margin-top:8px" {
                        div style="font-size:14px;font-weight:500;overflow:hidden;text-overflow:ellipsis;white-space:nowrap" {
                            (nft.display_name())
                        }
                        div class="muted" style="font-size:12px" { (nft.collection_name()) }
                    }
                }
            }
        }
    }
}

pub fn nft_detail(nft: &Collectible, back: &str, back_label: &str) -> Markup {
    html! {
        a href=(back) data-panel-link { "← " (back_label) }
        div class="card detail" style="margin-top:12px" {
            (image(nft, "No Image Available"))
            h3 { (nft.display_name()) }
            p class="muted" { (nft.description_text().unwrap_or("No description available")) }
            div style="display:grid;grid-template-columns:1fr 1fr;gap:8px;font-size:14px" {
                div { span class="muted" { "Contract: " } (nft.contract.name.as_deref().unwrap_or("Unknown")) }
                div { span class="muted" { "Token ID: " } (nft.token_id) }
                div { span class="muted" { "Token Type: " } (nft.token_type.as_deref().unwrap_or("Unknown")) }
                @if nft.estimated_value.is_some() {
                    div { span class="muted" { "Est. Value: " } (value_badge(nft)) }
                }
            }
            @if !nft.attributes().is_empty() {
                h4 { "Attributes" }
                div class="attributes" {
                    @for attribute in nft.attributes() {
                        div {
                            span class="muted" style="display:block" { (attribute.trait_type.as_deref().unwrap_or("")) }
                            strong { (attribute.value_text()) }
                        }
                    }
                }
            }
        }
    }
}
