use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::models::token::TokenHoldingsResponse;
use crate::portfolio;
use crate::state::AppState;

use super::{HttpError, require_alchemy, required_addresses};

pub fn router() -> Router<AppState> {
    Router::new().route("/tokens", get(token_balances))
}

#[derive(Debug, Deserialize)]
struct TokensQuery {
    addresses: Option<String>,
}

async fn token_balances(
    State(state): State<AppState>,
    Query(query): Query<TokensQuery>,
) -> Result<Json<TokenHoldingsResponse>, HttpError> {
    let addresses = required_addresses(query.addresses.as_deref(), "Missing addresses parameter")?;
    let client = require_alchemy(&state)?;

    let tokens = portfolio::collect_holdings(client, &addresses, state.limits.top_tokens).await;
    assert!(
        tokens.len() <= state.limits.top_tokens,
        "Token list exceeds configured top count"
    );
    Ok(Json(TokenHoldingsResponse { tokens }))
}

#[cfg(test)]
mod tests {
    use crate::http::router;
    use crate::test_support::{JsonRpcResponder, get_json, state_for};
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer};

    #[tokio::test]
    async fn missing_key_is_server_error() {
        let (status, body) =
            get_json(router(state_for(None, None)), "/api/tokens?addresses=0xA").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Alchemy API key not configured");
    }

    #[tokio::test]
    async fn top_five_non_zero_balances() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(JsonRpcResponder::new(|method, params| match method {
                "alchemy_getTokenBalances" => {
                    let mut balances: Vec<Value> = (1..=7)
                        .map(|i| {
                            json!({"contractAddress": format!("0xT{i}"), "tokenBalance": format!("0x{:x}", i * 100)})
                        })
                        .collect();
                    balances.push(json!({"contractAddress": "0xZero", "tokenBalance": "0x0"}));
                    Ok(json!({"address": params[0], "tokenBalances": balances}))
                }
                "alchemy_getTokenMetadata" => Ok(json!({
                    "name": "Token", "symbol": "TKN", "decimals": 2, "logo": null
                })),
                _ => Err(json!({"code": -32601, "message": "method not found"})),
            }))
            .mount(&server)
            .await;

        let app = router(state_for(Some(&server.uri()), None));
        let (status, body) = get_json(app, "/api/tokens?addresses=0xA").await;
        assert_eq!(status, StatusCode::OK);
        let tokens = body["tokens"].as_array().unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0]["contractAddress"], "0xT7");
        assert_eq!(tokens[0]["symbol"], "TKN");
        assert_eq!(tokens[0]["addresses"], json!(["0xA"]));
        assert!(tokens.iter().all(|token| token["tokenBalance"] != "0x0"));
    }
}
