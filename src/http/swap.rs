//! Swap execution: sign router calldata with the caller's key and broadcast.
//!
//! Check order matters for the error a caller sees: required fields, chain
//! support, RPC availability, key/address match, input parsing, the RPC
//! endpoint's chain id, then the on-chain steps.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::blockchain::{BlockchainClient, SwapExecutor, SwapOrder, Wallet};
use crate::http::request::{json_body, required_str};
use crate::http::response::{ApiError, ApiResponse};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Swap outcome returned to the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapData {
    pub transaction_hash: String,
    /// `false` when the transaction was mined but reverted.
    pub status: bool,
    pub gas_used: String,
    pub block_number: Option<String>,
    pub explorer_url: String,
}

/// `POST /api/swap`
pub async fn execute_swap(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<ApiResponse<SwapData>, ApiError> {
    let body = json_body(payload)?;

    let field = |name: &str| required_str(&body, name).ok_or_else(ApiError::missing_fields);
    let calldata = field("calldata")?;
    let router_address = field("routerAddress")?;
    let value = field("value")?;
    let chain_id = field("chainId")?;
    let user_address = field("userAddress")?;
    let private_key = field("privateKey")?;

    let inner = state.snapshot();
    let chain = chain_id
        .parse::<u64>()
        .ok()
        .and_then(|id| inner.registry.chain_by_id(id))
        .ok_or_else(|| ApiError::BadRequest("Unsupported chain ID".to_string()))?;

    if !chain.has_rpc() {
        tracing::warn!(chain = %chain.key, "Swap requested on a chain without RPC URL");
        return Err(ApiError::Internal(
            "RPC URL not configured for this chain".to_string(),
        ));
    }

    let wallet = Wallet::from_private_key(&private_key)?;
    wallet.ensure_matches(&user_address)?;
    let order = SwapOrder::parse(&router_address, &calldata, &value)?;

    tracing::info!(
        chain = %chain.key,
        account = %wallet.address(),
        router = %order.router,
        "Executing swap"
    );

    let settings = &inner.config.blockchain;
    let client = BlockchainClient::connect(
        &chain.rpc_url,
        Duration::from_secs(settings.rpc_timeout_secs),
    )?;
    let executor = SwapExecutor::new(client.clone(), wallet, chain.id)
        .with_gas_limit(settings.gas_limit)
        .with_receipt_timeout(Duration::from_secs(settings.receipt_timeout_secs));

    // Nothing is signed for an endpoint serving another chain.
    let outcome = match client.verify_chain_id(chain.id).await {
        Ok(()) => executor.execute(order).await,
        Err(e) => Err(e),
    };
    let receipt = match outcome {
        Ok(receipt) => receipt,
        Err(e) => {
            metrics::record_swap(if e.is_client_error() { "rejected" } else { "failed" });
            tracing::error!(chain = %chain.key, error = %e, "Swap execution failed");
            return Err(e.into());
        }
    };
    metrics::record_swap(if receipt.status { "success" } else { "reverted" });

    let transaction_hash = format!("{:#x}", receipt.transaction_hash);
    Ok(ApiResponse::ok(SwapData {
        explorer_url: chain.tx_url(&transaction_hash),
        transaction_hash,
        status: receipt.status,
        gas_used: receipt.gas_used.to_string(),
        block_number: receipt.block_number.map(|n| n.to_string()),
    }))
}
