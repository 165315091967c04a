use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use crate::providers::ProviderError;
use crate::state::AppState;

use super::{HttpError, require_neynar};

pub fn router() -> Router<AppState> {
    Router::new().route("/neynar/search", get(search_users))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

/// Relays the upstream user search. Upstream failures keep their status and
/// put the upstream JSON body under `error`.
async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, Response> {
    let q = query
        .q
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            HttpError::new(StatusCode::BAD_REQUEST, "Missing search query".to_string())
                .into_response()
        })?;
    let client = require_neynar(&state).map_err(IntoResponse::into_response)?;

    match client.search_raw(&q).await {
        Ok(body) => Ok(Json(body)),
        Err(ProviderError::HttpStatus { status, body }) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            let upstream: Value = serde_json::from_str(&body).unwrap_or(Value::String(body));
            Err((status, Json(json!({ "error": upstream }))).into_response())
        }
        Err(err) => {
            warn!(query = %q, error = %err, "user search failed");
            Err(HttpError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch user data".to_string(),
            )
            .into_response())
        }
    }
}
