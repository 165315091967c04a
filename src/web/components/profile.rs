use maud::{Markup, html};

use crate::models::identity::FarcasterUser;
use crate::web::links::{self, SearchTarget};

pub fn avatar(user: &FarcasterUser, class: &str) -> Markup {
    html! {
        @match user.pfp_url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => { img class=(class) src=(url) alt=(user.label()); }
            None => { span class=(class) { span class="muted" { (user.initial()) } } }
        }
    }
}

/// Avatar, display name and handle on one line.
pub fn user_summary(user: &FarcasterUser) -> Markup {
    html! {
        div class="user-summary" style="display:flex;gap:12px;align-items:center" {
            (avatar(user, "avatar"))
            div {
                div { strong { (user.label()) } " " span class="muted" { "@" (user.username) } }
                div class="muted" style="font-size:12px" { "FID: " (user.fid) }
            }
        }
    }
}

pub fn user_list(users: &[FarcasterUser], target: &SearchTarget) -> Markup {
    html! {
        @if users.is_empty() {
            p class="muted" { "No users found." }
        } @else {
            h3 class="muted" { "Results" }
            ul class="list" {
                @for user in users {
                    li {
                        a href=(target.href(user.fid)) style="color:inherit;text-decoration:none" {
                            (user_summary(user))
                        }
                    }
                }
            }
        }
    }
}

pub fn profile_card(user: &FarcasterUser) -> Markup {
    let primary = user.primary_address();
    let addresses = user.holding_addresses();
    html! {
        div class="card profile" {
            div style="display:flex;gap:16px;align-items:center" {
                (avatar(user, "avatar large"))
                div style="flex:1" {
                    h1 style="margin:0" { (user.label()) }
                    div class="muted" { "@" (user.username) }
                    div class="muted" style="font-size:14px" {
                        (user.following_count.unwrap_or(0)) " following · "
                        (user.follower_count.unwrap_or(0)) " followers · FID " (user.fid)
                    }
                }
                a class="btn" href=(links::compare_with(user.fid)) { "Compare" }
            }

            @if let Some(bio) = user.bio() {
                p { (bio) }
            }

            @if user.x_account().is_some() || user.other_accounts().next().is_some() {
                div style="display:flex;gap:8px;flex-wrap:wrap" {
                    @if let Some(x) = user.x_account() {
                        a class="pill" href=(links::x_profile(&x.username)) target="_blank" rel="noopener noreferrer" {
                            "@" (x.username)
                        }
                    }
                    @for account in user.other_accounts() {
                        span class="pill muted" { (account.platform) ": @" (account.username) }
                    }
                }
            }

            h3 { "Ethereum Addresses" }
            @for address in &addresses {
                @let is_primary = address.eq_ignore_ascii_case(primary);
                div class=(if is_primary { "address primary" } else { "address" }) {
                    (address)
                    @if is_primary {
                        " " span class="pill" { "Primary" }
                    }
                    div style="font-size:12px;margin-top:4px" {
                        a href=(links::basescan(address)) target="_blank" rel="noopener noreferrer" { "View on Basescan" }
                        " · "
                        a href=(links::etherscan(address)) target="_blank" rel="noopener noreferrer" { "View on Etherscan" }
                    }
                }
            }

            @if user.power_badge.unwrap_or(false) {
                div class="pill" { "⚡ Power User" }
            }
        }
    }
}
