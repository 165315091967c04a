use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::models::names::NameLookupResponse;
use crate::portfolio;
use crate::state::AppState;

use super::{HttpError, required_addresses};

pub fn router() -> Router<AppState> {
    Router::new().route("/basenames", get(lookup_names))
}

#[derive(Debug, Deserialize)]
struct NamesQuery {
    addresses: Option<String>,
}

async fn lookup_names(
    State(state): State<AppState>,
    Query(query): Query<NamesQuery>,
) -> Result<Json<NameLookupResponse>, HttpError> {
    let addresses = required_addresses(query.addresses.as_deref(), "Missing addresses parameter")?;
    let results = portfolio::resolve_names(&state.names, &addresses).await;
    assert_eq!(
        results.len(),
        addresses.len(),
        "Every address must yield one record"
    );
    Ok(Json(NameLookupResponse { results }))
}
