//! Blockchain RPC client with per-call timeouts.
//!
//! # Responsibilities
//! - Connect to a chain's JSON-RPC endpoint
//! - Query gas price, balances and nonces
//! - Broadcast raw transactions and wait for their receipts

use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// RPC client bound to one chain.
#[derive(Clone)]
pub struct BlockchainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    rpc_url: String,
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a client. No request is made until the first call.
    pub fn connect(rpc_url: &str, timeout_duration: Duration) -> BlockchainResult<Self> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

        let provider = ProviderBuilder::new().connect_http(url);

        Ok(Self {
            provider: Arc::new(provider),
            rpc_url: rpc_url.to_string(),
            timeout_duration,
        })
    }

    async fn call<T, E, F>(&self, what: &str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(call = what, error = %e, "RPC error");
                Err(BlockchainError::Rpc(format!("{}: {}", what, e)))
            }
            Err(_) => {
                tracing::warn!(call = what, "RPC timeout");
                Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }

    pub async fn get_chain_id(&self) -> BlockchainResult<u64> {
        self.call("eth_chainId", self.provider.get_chain_id()).await
    }

    /// Fail unless the endpoint serves `expected`.
    pub async fn verify_chain_id(&self, expected: u64) -> BlockchainResult<()> {
        let actual = self.get_chain_id().await?;
        if actual != expected {
            return Err(BlockchainError::ChainMismatch { expected, actual });
        }
        Ok(())
    }

    /// Current gas price in wei.
    pub async fn get_gas_price(&self) -> BlockchainResult<u128> {
        self.call("eth_gasPrice", self.provider.get_gas_price()).await
    }

    pub async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        self.call("eth_getBalance", self.provider.get_balance(address)).await
    }

    /// Pending-inclusive nonce for `address`.
    pub async fn get_transaction_count(&self, address: Address) -> BlockchainResult<u64> {
        self.call(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address).pending(),
        )
        .await
    }

    /// Broadcast a signed, EIP-2718 encoded transaction and wait for it to be mined.
    pub async fn send_raw_and_wait(
        &self,
        raw: &[u8],
        receipt_timeout: Duration,
    ) -> BlockchainResult<TransactionReceipt> {
        let broadcast = self.provider.send_raw_transaction(raw);
        let pending = match timeout(self.timeout_duration, broadcast).await {
            Ok(Ok(pending)) => pending,
            Ok(Err(e)) => return Err(BlockchainError::Broadcast(e.to_string())),
            Err(_) => return Err(BlockchainError::Timeout(self.timeout_duration.as_secs())),
        };

        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, "Transaction broadcast, awaiting receipt");

        pending
            .with_timeout(Some(receipt_timeout))
            .get_receipt()
            .await
            .map_err(|e| {
                tracing::warn!(tx_hash = %tx_hash, error = %e, "No receipt");
                BlockchainError::ReceiptTimeout(tx_hash)
            })
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.rpc_url)
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
