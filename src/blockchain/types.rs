//! Chain-specific types and error definitions.

use alloy::primitives::{TxHash, U256};
use thiserror::Error;

/// Errors that can occur while preparing or broadcasting a swap.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Invalid private key format.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// The signing key belongs to someone other than the claimed user.
    #[error("Private key does not match user address")]
    AddressMismatch,

    /// Balance cannot cover value plus worst-case gas.
    #[error("Insufficient balance. Need {required}, have {balance}")]
    InsufficientBalance { required: U256, balance: U256 },

    /// Malformed transaction input (address, calldata, value).
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Building or signing the transaction failed.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The node refused the raw transaction.
    #[error("Broadcast failed: {0}")]
    Broadcast(String),

    /// No receipt arrived in time.
    #[error("Transaction {0} not mined before timeout")]
    ReceiptTimeout(TxHash),

    /// The RPC endpoint serves a different chain than the one requested.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

impl BlockchainError {
    /// Whether the caller, not the chain, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BlockchainError::Wallet(_)
                | BlockchainError::AddressMismatch
                | BlockchainError::InsufficientBalance { .. }
                | BlockchainError::InvalidInput { .. }
        )
    }
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Outcome of a mined swap transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReceipt {
    pub transaction_hash: TxHash,
    /// `true` if the transaction executed without reverting.
    pub status: bool,
    pub gas_used: u64,
    pub block_number: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BlockchainError::InsufficientBalance {
            required: U256::from(1_000_000u64),
            balance: U256::from(5u64),
        };
        assert_eq!(err.to_string(), "Insufficient balance. Need 1000000, have 5");
        assert!(err.is_client_error());

        let err = BlockchainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");
        assert!(!err.is_client_error());

        assert_eq!(
            BlockchainError::AddressMismatch.to_string(),
            "Private key does not match user address"
        );

        let err = BlockchainError::ChainMismatch {
            expected: 8453,
            actual: 42161,
        };
        assert_eq!(err.to_string(), "Chain ID mismatch: expected 8453, got 42161");
        assert!(!err.is_client_error());
    }
}
