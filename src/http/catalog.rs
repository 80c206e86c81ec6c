//! Static catalog endpoints and liveness.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::http::response::{ApiError, ApiResponse};
use crate::http::server::AppState;
use crate::registry::{Chain, Token};

/// Public view of a chain. Never carries the RPC URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub id: u64,
    pub name: String,
    /// Router chain key.
    pub chain_id: String,
    pub native_currency: String,
    pub explorer: String,
    pub logo: String,
}

impl From<&Chain> for ChainInfo {
    fn from(chain: &Chain) -> Self {
        Self {
            id: chain.id,
            name: chain.name.clone(),
            chain_id: chain.key.clone(),
            native_currency: chain.native_currency.clone(),
            explorer: chain.explorer.clone(),
            logo: chain.logo.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
}

/// `GET /api/chains`
pub async fn list_chains(State(state): State<AppState>) -> ApiResponse<Vec<ChainInfo>> {
    let inner = state.snapshot();
    ApiResponse::ok(inner.registry.chains().iter().map(ChainInfo::from).collect())
}

/// `GET /api/tokens/{chain_key}`
pub async fn list_tokens(
    State(state): State<AppState>,
    Path(chain_key): Path<String>,
) -> Result<ApiResponse<&'static [Token]>, ApiError> {
    state
        .snapshot()
        .registry
        .tokens(&chain_key)
        .map(ApiResponse::ok)
        .ok_or_else(|| ApiError::BadRequest("Unsupported chain".to_string()))
}

/// `GET /api/health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    })
}
