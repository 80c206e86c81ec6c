//! Quote and price forwarding.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::http::request::{json_body, required_str};
use crate::http::response::{ApiError, ApiResponse};
use crate::http::server::AppState;
use crate::router::{TokenPrice, TokenPriceRequest};

/// Quote data returned to the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteData {
    pub router: String,
    pub calldata: String,
    pub input_amount: String,
    pub output_amount: String,
}

/// `POST /api/quote`
pub async fn get_quote(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<ApiResponse<QuoteData>, ApiError> {
    let body = json_body(payload)?;
    let inner = state.snapshot();

    let field = |name: &str| required_str(&body, name).ok_or_else(ApiError::missing_fields);
    let input_token = field("inputToken")?;
    let output_token = field("outputToken")?;
    let input_amount = field("inputAmount")?;
    let user_address = field("userAddress")?;
    let chain = field("chainID")?;

    // Numeric chain ids are translated to the router's chain key.
    let chain_key = match chain.parse::<u64>() {
        Ok(id) => inner.registry.api_chain_key(id),
        Err(_) => chain,
    };

    let request = inner.router.quote_request(
        &chain_key,
        &user_address,
        &input_token,
        &output_token,
        &input_amount,
    );

    let quote = inner.router.fetch_quote(&request).await.map_err(|e| {
        tracing::error!(chain = %chain_key, error = %e, "Quote request failed");
        ApiError::Internal("Internal server error".to_string())
    })?;

    let route = quote.into_route().map_err(|reason| {
        tracing::info!(chain = %chain_key, reason = %reason, "Router rejected quote");
        ApiError::BadRequest(reason)
    })?;

    Ok(ApiResponse::ok(QuoteData {
        output_amount: route.output_amount(),
        router: route.router,
        calldata: route.calldata,
        input_amount,
    }))
}

/// `POST /api/prices`
pub async fn get_prices(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<ApiResponse<Vec<TokenPrice>>, ApiError> {
    let body = json_body(payload)?;

    let requests = match body.get("requests") {
        Some(Value::Array(items)) => items.clone(),
        _ => {
            return Err(ApiError::BadRequest(
                "Missing or invalid requests array".to_string(),
            ))
        }
    };
    let requests: Vec<TokenPriceRequest> = serde_json::from_value(Value::Array(requests))
        .map_err(|e| ApiError::BadRequest(format!("Invalid price request: {}", e)))?;

    let inner = state.snapshot();
    let prices = inner
        .router
        .fetch_prices(&requests)
        .await
        .map_err(|e| {
            tracing::error!(pairs = requests.len(), error = %e, "Price lookup failed");
            ApiError::Internal(e.to_string())
        })?;

    Ok(ApiResponse::ok(prices))
}
