use axum::http::StatusCode;

use crate::http::NEYNAR_KEY_MISSING;
use crate::models::identity::FarcasterUser;
use crate::providers::{NeynarClient, ProviderError};
use crate::state::AppState;

use super::PageError;

pub mod compare;
pub mod profile;
pub mod search;

fn neynar(state: &AppState) -> Result<&NeynarClient, PageError> {
    state
        .neynar
        .as_ref()
        .ok_or_else(|| PageError::new(StatusCode::INTERNAL_SERVER_ERROR, NEYNAR_KEY_MISSING))
}

fn parse_fid(raw: &str) -> Result<u64, PageError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| PageError::new(StatusCode::BAD_REQUEST, format!("Invalid FID: {raw}")))
}

fn upstream_error(err: ProviderError) -> PageError {
    PageError::new(
        StatusCode::BAD_GATEWAY,
        format!("Failed to fetch user data: {err}"),
    )
}

/// Looks up each fid in one bulk call; any fid without a profile is a 404.
async fn fetch_users(state: &AppState, fids: &[u64]) -> Result<Vec<FarcasterUser>, PageError> {
    let users = neynar(state)?
        .users_by_fid(fids)
        .await
        .map_err(upstream_error)?;
    fids.iter()
        .map(|fid| {
            users
                .iter()
                .find(|user| user.fid == *fid)
                .cloned()
                .ok_or_else(|| PageError::new(StatusCode::NOT_FOUND, format!("User {fid} not found")))
        })
        .collect()
}

async fn fetch_user(state: &AppState, fid: u64) -> Result<FarcasterUser, PageError> {
    neynar(state)?
        .user(fid)
        .await
        .map_err(upstream_error)?
        .ok_or_else(|| PageError::new(StatusCode::NOT_FOUND, format!("User {fid} not found")))
}
