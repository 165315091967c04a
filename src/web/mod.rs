//! Server-rendered pages. Each page renders its panels in `loading` state and
//! the layout script fills them from the `/panels/*` fragments.

use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use maud::html;
use tracing::info;

use crate::state::AppState;

use self::components::layout::layout;

pub mod components;
pub mod links;
mod pages;
mod panels;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::search::search_page))
        .route("/profile/{fid}", get(pages::profile::profile_page))
        .route("/compare", get(pages::compare::compare_page))
        .route("/panels/search", get(panels::search))
        .route("/panels/tokens", get(panels::tokens))
        .route("/panels/names", get(panels::names))
        .route("/panels/best-nft", get(panels::best_nft))
        .route("/panels/gallery", get(panels::gallery))
        .route("/panels/nft", get(panels::nft))
        .route("/panels/compare", get(panels::compare))
}

/// Whole-page failure, rendered inside the normal layout.
#[derive(Debug)]
pub struct PageError {
    status: StatusCode,
    message: String,
}

impl PageError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        assert!(status != StatusCode::OK, "Error status cannot be 200");
        assert!(!message.is_empty(), "Error message cannot be empty");
        Self { status, message }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        info!("Page error: {}", self.message);
        let page = layout(
            "Error",
            html! {
                div class="card" {
                    div class="error" { "Error: " (self.message) }
                    p { a href="/" { "Back to search" } }
                }
            },
        );
        (self.status, Html(page.into_string())).into_response()
    }
}
