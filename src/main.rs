//! dex-gateway
//!
//! ```text
//!     Client ──▶ http (axum + tower-http layers)
//!                 ├─ /api/quote, /api/prices ──▶ router client ──▶ router / price service
//!                 ├─ /api/swap ──▶ blockchain (sign, fund check) ──▶ chain JSON-RPC
//!                 └─ /api/chains, /api/tokens, /api/health ──▶ registry
//!
//!     config (TOML + env, hot reload) · observability (tracing, metrics)
//!     resilience (retry/backoff) · lifecycle (signals, graceful shutdown)
//! ```

use clap::Parser;
use std::path::PathBuf;

use dex_gateway::config::{load_config, GatewayConfig};
use dex_gateway::lifecycle::startup;
use dex_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "dex-gateway", version)]
#[command(about = "HTTP gateway for quoting and executing DEX swaps", long_about = None)]
struct Args {
    /// TOML configuration file. Watched for changes when given.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::from_env()?,
    };

    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        retries = config.retries.max_attempts,
        metrics_enabled = config.observability.metrics_enabled,
        "dex-gateway starting"
    );

    startup::start(config, args.config).await?;
    Ok(())
}
