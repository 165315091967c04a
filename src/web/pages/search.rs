use axum::extract::Query;
use axum::response::Html;
use maud::{Markup, html};
use serde::Deserialize;

use crate::models::identity::FarcasterUser;
use crate::web::components::layout::layout;
use crate::web::components::panel::Panel;
use crate::web::links::{self, SearchTarget};
use crate::web::panels::render_search;

#[derive(Debug, Deserialize)]
pub struct SearchPageQuery {
    q: Option<String>,
}

/// Search form plus, when a query is present, the results panel for it.
/// `hidden` carries extra fields the form must resubmit.
pub fn search_form(
    action: &str,
    query: Option<&str>,
    target: &SearchTarget,
    hidden: &[(&str, String)],
) -> Markup {
    let query = query.map(str::trim).filter(|q| !q.is_empty());
    html! {
        form class="search" method="get" action=(action) {
            @for (name, value) in hidden {
                input type="hidden" name=(name) value=(value);
            }
            input class="input" type="text" name="q" value=[query] placeholder="Search by Farcaster username...";
            button class="btn" type="submit" { "Search" }
        }
        @if let Some(q) = query {
            div style="margin-top:16px" {
                (render_search(&Panel::<Vec<FarcasterUser>>::loading(links::search_panel(q, target)), target))
            }
        }
    }
}

pub async fn search_page(Query(query): Query<SearchPageQuery>) -> Html<String> {
    let page = layout(
        "Search",
        html! {
            div class="card" {
                h1 { "Find a Farcaster profile" }
                p class="muted" { "See Base names, token balances and NFTs across every verified address." }
                (search_form("/", query.q.as_deref(), &SearchTarget::Profile, &[]))
            }
        },
    );
    Html(page.into_string())
}
