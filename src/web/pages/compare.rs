use axum::extract::{Query, State};
use axum::response::Html;
use maud::html;
use serde::Deserialize;

use crate::state::AppState;
use crate::web::PageError;
use crate::web::components::layout::layout;
use crate::web::components::panel::Panel;
use crate::web::components::profile::user_summary;
use crate::web::links::{self, SearchTarget};
use crate::web::panels::{ComparisonView, render_compare};

use super::search::search_form;
use super::{fetch_user, fetch_users, parse_fid};

#[derive(Debug, Deserialize)]
pub struct ComparePageQuery {
    fid1: Option<String>,
    fid2: Option<String>,
    q: Option<String>,
}

fn optional_fid(raw: Option<&str>) -> Result<Option<u64>, PageError> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(parse_fid)
        .transpose()
}

/// With both fids the comparison itself; otherwise a picker that fills the next empty slot.
pub async fn compare_page(
    State(state): State<AppState>,
    Query(query): Query<ComparePageQuery>,
) -> Result<Html<String>, PageError> {
    let fid1 = optional_fid(query.fid1.as_deref())?;
    let fid2 = optional_fid(query.fid2.as_deref())?;

    let content = match (fid1, fid2) {
        (Some(fid1), Some(fid2)) => {
            let users = fetch_users(&state, &[fid1, fid2]).await?;
            let (user1, user2) = (&users[0], &users[1]);
            let panel = Panel::<ComparisonView>::loading(links::compare_panel(
                &user1.holding_addresses(),
                &user2.holding_addresses(),
            ));
            html! {
                div class="card" {
                    div class="versus" {
                        a href=(links::profile(user1.fid)) style="color:inherit;text-decoration:none" { (user_summary(user1)) }
                        strong { "vs" }
                        a href=(links::profile(user2.fid)) style="color:inherit;text-decoration:none" { (user_summary(user2)) }
                    }
                    p { a href="/compare" { "Start over" } }
                }
                div class="card" { (render_compare(&panel)) }
            }
        }
        (Some(fid1), None) => {
            let user1 = fetch_user(&state, fid1).await?;
            let target = SearchTarget::CompareSecond(fid1);
            html! {
                div class="card" {
                    h2 { "Compare NFTs" }
                    p class="muted" { "First user" }
                    (user_summary(&user1))
                    p class="muted" { "Pick the second user" }
                    (search_form("/compare", query.q.as_deref(), &target, &[("fid1", fid1.to_string())]))
                }
            }
        }
        _ => html! {
            div class="card" {
                h2 { "Compare NFTs" }
                p class="muted" { "Pick the first user" }
                (search_form("/compare", query.q.as_deref(), &SearchTarget::CompareFirst, &[]))
            }
        },
    };

    Ok(Html(layout("Compare", content).into_string()))
}
