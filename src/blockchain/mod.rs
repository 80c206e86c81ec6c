//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Swap request (calldata, router, value, key)
//!     → wallet.rs (key loading, address check, signing)
//!     → client.rs (RPC with timeouts: gas price, balance, nonce)
//!     → transaction.rs (fund check, build, sign, broadcast, receipt)
//! ```
//!
//! # Security Constraints
//! - Never log private keys
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use transaction::{SwapExecutor, SwapOrder, DEFAULT_GAS_LIMIT};
pub use types::{BlockchainError, BlockchainResult, SwapReceipt};
pub use wallet::Wallet;
