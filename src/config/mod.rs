//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional) + .env + process environment
//!     → loader.rs (parse, apply env overrides)
//!     → validation.rs (semantic checks, all errors at once)
//!     → GatewayConfig (validated, immutable)
//!     → snapshot shared via ArcSwap by the HTTP server
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs reloads and validates
//!     → server swaps in a fresh snapshot
//! ```

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BlockchainConfig, ChainOverrides, GatewayConfig, ListenerConfig, LogFormat,
    ObservabilityConfig, RetryConfig, RouterConfig, SecurityConfig, TimeoutConfig,
};
pub use watcher::ConfigWatcher;
