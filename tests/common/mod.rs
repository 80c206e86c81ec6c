//! Shared utilities for integration testing.
//!
//! [`MockUpstream`] plays the router, the price service and a minimal
//! JSON-RPC node on one loopback port. Responses are programmable and every
//! request is recorded.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use dex_gateway::config::GatewayConfig;
use dex_gateway::{HttpServer, Shutdown};

pub const API_KEY: &str = "test-key";
pub const UNIQUE_PID: &str = "test-pid";
pub const ROUTER_ADDRESS: &str = "0x6Ec7612828B776cC746fe0Ee5381CC93878844f7";

/// Anvil's first account.
pub const TEST_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Hash the mock node assigns to every broadcast transaction.
pub const MINED_TX_HASH: &str =
    "0x1111111111111111111111111111111111111111111111111111111111111111";
/// Block the mock node mines every transaction in.
pub const MINED_BLOCK: u64 = 16;

/// A request seen by the mock.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: &'static str,
    pub api_key: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct MockState {
    quote: Mutex<Option<(u16, Value)>>,
    quote_delay: Mutex<Option<Duration>>,
    prices: Mutex<Option<(u16, Value)>>,
    balance_hex: Mutex<Option<String>>,
    recorded: Mutex<Vec<Recorded>>,
}

#[derive(Clone)]
pub struct MockUpstream {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/v1/quote", post(quote))
            .route("/prices", post(prices))
            .route("/rpc", post(rpc))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn quote_url(&self) -> String {
        format!("http://{}/v1/quote", self.addr)
    }

    pub fn price_url(&self) -> String {
        format!("http://{}/prices", self.addr)
    }

    pub fn rpc_url(&self) -> String {
        format!("http://{}/rpc", self.addr)
    }

    pub fn set_quote(&self, status: u16, body: Value) {
        *self.state.quote.lock().unwrap() = Some((status, body));
    }

    /// Hold every quote reply for `delay`.
    pub fn set_quote_delay(&self, delay: Duration) {
        *self.state.quote_delay.lock().unwrap() = Some(delay);
    }

    pub fn set_prices(&self, status: u16, body: Value) {
        *self.state.prices.lock().unwrap() = Some((status, body));
    }

    pub fn set_balance_hex(&self, balance: &str) {
        *self.state.balance_hex.lock().unwrap() = Some(balance.to_string());
    }

    pub fn requests(&self, path: &str) -> Vec<Recorded> {
        self.state
            .recorded
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    /// JSON-RPC methods called on the mock node, in order.
    pub fn rpc_methods(&self) -> Vec<String> {
        self.requests("rpc")
            .iter()
            .filter_map(|r| r.body["method"].as_str().map(str::to_string))
            .collect()
    }
}

fn record(state: &MockState, path: &'static str, headers: &HeaderMap, body: &Bytes) -> Value {
    let body: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    state.recorded.lock().unwrap().push(Recorded {
        path,
        api_key: headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.clone(),
    });
    body
}

fn reply(status: u16, body: Value) -> Response {
    (StatusCode::from_u16(status).unwrap(), Json(body)).into_response()
}

async fn quote(State(state): State<Arc<MockState>>, headers: HeaderMap, body: Bytes) -> Response {
    record(&state, "quote", &headers, &body);
    let delay = *state.quote_delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    let configured = state.quote.lock().unwrap().clone();
    let (status, body) = configured.unwrap_or_else(|| {
        (
            200,
            json!({
                "statusCode": 200,
                "result": {
                    "router": ROUTER_ADDRESS,
                    "calldata": "0xdeadbeef",
                    "inputAmount": "ignored",
                    "outputAmount": "2500000000"
                }
            }),
        )
    });
    reply(status, body)
}

async fn prices(State(state): State<Arc<MockState>>, headers: HeaderMap, body: Bytes) -> Response {
    let requests = record(&state, "prices", &headers, &body);
    let configured = state.prices.lock().unwrap().clone();
    let (status, body) = configured.unwrap_or_else(|| {
        let priced: Vec<Value> = requests
            .as_array()
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|mut r| {
                r["price"] = json!(1.25);
                r
            })
            .collect();
        (200, Value::Array(priced))
    });
    reply(status, body)
}

async fn rpc(State(state): State<Arc<MockState>>, headers: HeaderMap, body: Bytes) -> Response {
    let request = record(&state, "rpc", &headers, &body);
    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request.get("method").and_then(Value::as_str).unwrap_or_default();

    let balance = state
        .balance_hex
        .lock()
        .unwrap()
        .clone()
        .unwrap_or_else(|| "0x0".to_string());

    let result = match method {
        "eth_chainId" => json!("0xa4b1"),
        "eth_gasPrice" => json!("0x3b9aca00"),
        "eth_getBalance" => json!(balance),
        "eth_getTransactionCount" => json!("0x0"),
        "eth_blockNumber" => json!(format!("{:#x}", MINED_BLOCK)),
        "eth_sendRawTransaction" => json!(MINED_TX_HASH),
        "eth_getTransactionReceipt" => mined_receipt(),
        _ => {
            let error = json!({"code": -32601, "message": "method not found"});
            return reply(200, json!({"jsonrpc": "2.0", "id": id, "error": error}));
        }
    };
    reply(200, json!({"jsonrpc": "2.0", "id": id, "result": result}))
}

/// A successful legacy receipt for [`MINED_TX_HASH`], 21000 gas.
fn mined_receipt() -> Value {
    json!({
        "transactionHash": MINED_TX_HASH,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "22".repeat(32)),
        "blockNumber": format!("{:#x}", MINED_BLOCK),
        "from": TEST_ADDRESS.to_lowercase(),
        "to": ROUTER_ADDRESS.to_lowercase(),
        "cumulativeGasUsed": "0x5208",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "type": "0x0",
        "status": "0x1"
    })
}

/// Gateway configuration pointed at `upstream`, with fast retries.
pub fn test_config(upstream: &MockUpstream) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.router.quote_url = upstream.quote_url();
    config.router.price_url = upstream.price_url();
    config.router.api_key = API_KEY.to_string();
    config.router.unique_pid = UNIQUE_PID.to_string();
    config.router.timeout_secs = 5;
    config.retries.base_delay_ms = 1;
    config.retries.max_delay_ms = 5;
    config
        .chains
        .rpc_urls
        .insert("arbitrum".to_string(), upstream.rpc_url());
    config
}

/// A gateway running on a loopback port.
pub struct TestGateway {
    pub base_url: String,
    pub config_updates: mpsc::UnboundedSender<GatewayConfig>,
    shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn spawn_gateway(config: GatewayConfig) -> TestGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let (config_updates, updates_rx) = mpsc::unbounded_channel();
    tokio::spawn(server.run(listener, updates_rx, shutdown.subscribe()));

    TestGateway {
        base_url: format!("http://{}", addr),
        config_updates,
        shutdown,
    }
}
