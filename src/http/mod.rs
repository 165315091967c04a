use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::portfolio::addresses::parse_address_list;
use crate::providers::{AlchemyClient, NeynarClient};
use crate::state::AppState;
use crate::web;

mod collectibles;
mod names;
mod search;
mod tokens;

pub const ALCHEMY_KEY_MISSING: &str = "Alchemy API key not configured";
pub const NEYNAR_KEY_MISSING: &str = "API key not configured";

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let api_router = Router::new()
        .merge(names::router())
        .merge(collectibles::router())
        .merge(tokens::router())
        .merge(search::router());

    Router::new()
        .route("/health", get(health_live))
        .nest("/api", api_router)
        .merge(web::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_live(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "live",
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_seconds: u64,
}

pub(crate) fn require_alchemy(state: &AppState) -> Result<&AlchemyClient, HttpError> {
    state.alchemy.as_ref().ok_or_else(|| {
        HttpError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ALCHEMY_KEY_MISSING.to_string(),
        )
    })
}

pub(crate) fn require_neynar(state: &AppState) -> Result<&NeynarClient, HttpError> {
    state.neynar.as_ref().ok_or_else(|| {
        HttpError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            NEYNAR_KEY_MISSING.to_string(),
        )
    })
}

/// Splits a required comma-separated address parameter; absent or empty is a 400.
pub(crate) fn required_addresses(
    raw: Option<&str>,
    missing: &str,
) -> Result<Vec<String>, HttpError> {
    let raw = raw
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| HttpError::new(StatusCode::BAD_REQUEST, missing.to_string()))?;
    let addresses = parse_address_list(raw);
    if addresses.is_empty() {
        return Err(HttpError::new(
            StatusCode::BAD_REQUEST,
            "No valid addresses provided".to_string(),
        ));
    }
    Ok(addresses)
}

pub(crate) fn parse_limit(raw: Option<&str>, default: usize) -> Result<usize, HttpError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(default),
        Some(value) => value.parse::<usize>().map_err(|_| {
            HttpError::new(
                StatusCode::BAD_REQUEST,
                format!("Invalid limit parameter: {value}"),
            )
        }),
    }
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn new(status: StatusCode, message: String) -> Self {
        assert!(status != StatusCode::OK, "Error status cannot be 200");
        assert!(!message.is_empty(), "Error message cannot be empty");
        Self { status, message }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        info!("HTTP error: {}", self.message);
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}
