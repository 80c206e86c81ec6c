//! Wallet management and transaction signing.
//!
//! # Security
//! - Keys are never logged or serialized
//! - Only the derived address appears in log output

use alloy::consensus::TxEnvelope;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::Address;
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Environment variable read by [`Wallet::from_env`].
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// A local signing key.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key (with or without `0x`).
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        if key_hex.len() != 64 {
            return Err(BlockchainError::Wallet(
                "Invalid private key format: expected 32-byte hex".to_string(),
            ));
        }

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        Ok(Self { signer })
    }

    /// Load the key from `PRIVATE_KEY`.
    pub fn from_env() -> BlockchainResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            BlockchainError::Wallet(format!("Environment variable {} not set", PRIVATE_KEY_ENV_VAR))
        })?;
        Self::from_private_key(&private_key)
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Whether `claimed` is this wallet's address, ignoring hex case.
    pub fn matches(&self, claimed: &str) -> bool {
        claimed
            .trim()
            .parse::<Address>()
            .map(|addr| addr == self.address())
            .unwrap_or(false)
    }

    /// Fail with [`BlockchainError::AddressMismatch`] unless [`Self::matches`].
    pub fn ensure_matches(&self, claimed: &str) -> BlockchainResult<()> {
        if self.matches(claimed) {
            Ok(())
        } else {
            Err(BlockchainError::AddressMismatch)
        }
    }

    /// Sign a fully populated transaction request.
    pub async fn sign_transaction(&self, tx: TransactionRequest) -> BlockchainResult<TxEnvelope> {
        let wallet = EthereumWallet::from(self.signer.clone());
        tx.build(&wallet)
            .await
            .map_err(|e| BlockchainError::Signing(e.to_string()))
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Anvil's first account. Publicly known, never holds real funds.
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    #[test]
    fn test_wallet_from_private_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(wallet.address().to_string().to_lowercase(), TEST_ADDRESS);
    }

    #[test]
    fn test_wallet_with_0x_prefix() {
        let wallet = Wallet::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY)).unwrap();
        assert_eq!(wallet.address().to_string().to_lowercase(), TEST_ADDRESS);
    }

    #[test]
    fn test_matches_ignores_case() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert!(wallet.matches(TEST_ADDRESS));
        assert!(wallet.matches("0xF39FD6E51AAD88F6F4CE6AB8827279CFFFB92266"));
        assert!(wallet.matches("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"));
        assert!(!wallet.matches("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"));
        assert!(!wallet.matches("not-an-address"));
        assert!(matches!(
            wallet.ensure_matches("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"),
            Err(BlockchainError::AddressMismatch)
        ));
    }

    #[test]
    fn test_invalid_private_key() {
        let result = Wallet::from_private_key("invalid_key");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid private key"));

        let non_hex = "zz".repeat(32);
        assert!(Wallet::from_private_key(&non_hex).is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let debug = format!("{:?}", wallet);
        assert!(!debug.contains(TEST_PRIVATE_KEY));
    }
}
