use axum::extract::{Path, State};
use axum::response::Html;
use maud::html;

use crate::models::collectible::Collectible;
use crate::models::names::NameRecord;
use crate::models::token::TokenHolding;
use crate::state::AppState;
use crate::web::PageError;
use crate::web::components::layout::layout;
use crate::web::components::panel::Panel;
use crate::web::components::profile::profile_card;
use crate::web::links;
use crate::web::panels::{
    GalleryPage, render_best_nft, render_gallery, render_names, render_tokens,
};

use super::{fetch_user, parse_fid};

pub async fn profile_page(
    State(state): State<AppState>,
    Path(fid): Path<String>,
) -> Result<Html<String>, PageError> {
    let fid = parse_fid(&fid)?;
    let user = fetch_user(&state, fid).await?;

    let holdings = user.holding_addresses();
    let names = user.name_addresses();

    let tokens = Panel::<Vec<TokenHolding>>::loading(links::tokens_panel(&holdings));
    let basenames = Panel::<Vec<NameRecord>>::loading(links::names_panel(&names));
    let best = Panel::<Option<Collectible>>::loading(links::best_nft_panel(&holdings));
    let gallery = Panel::<GalleryPage>::loading(links::gallery_panel(&holdings, 0));

    let page = layout(
        &format!("@{}", user.username),
        html! {
            (profile_card(&user))
            div class="card" {
                h2 { "Token Balances" }
                (render_tokens(&tokens))
            }
            div class="card" {
                h2 { "Basenames" }
                (render_names(&basenames))
            }
            div class="card" {
                h2 { "Most Valuable NFT" }
                (render_best_nft(&best))
            }
            div class="card" {
                (render_gallery(&gallery))
            }
        },
    );
    Ok(Html(page.into_string()))
}
