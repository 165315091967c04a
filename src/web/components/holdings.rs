use maud::{Markup, html};

use crate::models::names::NameRecord;
use crate::models::token::TokenHolding;
use crate::portfolio::balances::format_units;

pub fn token_list(tokens: &[TokenHolding]) -> Markup {
    html! {
        @if tokens.is_empty() {
            p class="muted" { "No token balances found for this user." }
        } @else {
            ul class="list" {
                @for token in tokens {
                    li {
                        @match token.logo.as_deref().filter(|logo| !logo.is_empty()) {
                            Some(logo) => { img class="avatar" src=(logo) alt=(token.symbol.as_deref().unwrap_or("Token")); }
                            None => { span class="avatar" { span class="muted" { (symbol_initial(token)) } } }
                        }
                        div {
                            div {
                                strong { (token.name.as_deref().unwrap_or("Unknown Token")) }
                                @if let Some(symbol) = &token.symbol {
                                    " " span class="muted" { (symbol) }
                                }
                            }
                            div {
                                (format_units(&token.token_balance, token.decimals).unwrap_or_else(|| "Unknown".to_string()))
                                @if let Some(symbol) = &token.symbol {
                                    " " (symbol)
                                }
                            }
                            @if token.addresses.len() > 1 {
                                div class="muted" style="font-size:12px" {
                                    "Found in " (token.addresses.len()) " addresses"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn symbol_initial(token: &TokenHolding) -> String {
    token
        .symbol
        .as_deref()
        .and_then(|symbol| symbol.chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

/// Only addresses with a registered name are shown.
pub fn name_list(records: &[NameRecord]) -> Markup {
    let named: Vec<(&str, &str)> = records
        .iter()
        .filter_map(|record| Some((record.basename.as_deref()?, record.address.as_str())))
        .collect();
    html! {
        @if named.is_empty() {
            p class="muted" { "No basenames found for this user." }
        } @else {
            ul class="list" {
                @for (name, address) in named {
                    li {
                        div {
                            strong { (name) }
                            div class="muted" style="font-size:12px;word-break:break-all" { "Address: " (address) }
                        }
                    }
                }
            }
        }
    }
}
