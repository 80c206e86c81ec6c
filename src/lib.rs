//! DEX aggregation gateway.
//!
//! A thin HTTP layer in front of an external swap router: quotes and prices
//! are forwarded, swaps are signed locally and broadcast over JSON-RPC, and
//! chain and token tables are served from static data.

pub mod blockchain;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;
pub mod resilience;
pub mod router;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use registry::Registry;
