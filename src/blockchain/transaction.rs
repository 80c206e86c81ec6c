//! Swap transaction building, funding check, signing and broadcast.
//!
//! The router supplies the target contract and calldata. This module only
//! wraps them in a legacy (gas-price) transaction with a fixed gas limit,
//! refuses to broadcast when the sender cannot cover `value + gas_price *
//! gas_limit`, then signs, sends and waits for the receipt.

use alloy::eips::eip2718::Encodable2718;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::TransactionRequest;
use std::str::FromStr;
use std::time::Duration;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, SwapReceipt};
use crate::blockchain::wallet::Wallet;

/// Gas limit used when the caller has no better figure.
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;

/// Router-provided swap instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOrder {
    /// Router contract to call.
    pub router: Address,
    pub calldata: Bytes,
    /// Native value attached, in wei.
    pub value: U256,
}

impl SwapOrder {
    /// Parse the string form used on the wire.
    ///
    /// `value` accepts decimal or `0x`-prefixed hex.
    pub fn parse(router: &str, calldata: &str, value: &str) -> BlockchainResult<Self> {
        let router = Address::from_str(router.trim()).map_err(|e| BlockchainError::InvalidInput {
            field: "routerAddress",
            reason: e.to_string(),
        })?;
        let calldata = Bytes::from_str(calldata.trim()).map_err(|e| BlockchainError::InvalidInput {
            field: "calldata",
            reason: e.to_string(),
        })?;
        let value = U256::from_str(value.trim()).map_err(|e| BlockchainError::InvalidInput {
            field: "value",
            reason: e.to_string(),
        })?;

        Ok(Self { router, calldata, value })
    }
}

/// Worst-case spend: attached value plus a full gas allowance.
pub fn required_funds(value: U256, gas_price: u128, gas_limit: u64) -> U256 {
    value.saturating_add(U256::from(gas_price).saturating_mul(U256::from(gas_limit)))
}

/// Fail with [`BlockchainError::InsufficientBalance`] if `balance < required`.
pub fn ensure_sufficient_balance(balance: U256, required: U256) -> BlockchainResult<()> {
    if balance < required {
        return Err(BlockchainError::InsufficientBalance { required, balance });
    }
    Ok(())
}

/// Everything needed for the unsigned swap transaction.
#[derive(Debug, Clone)]
pub struct SwapTxParams {
    pub from: Address,
    pub order: SwapOrder,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub nonce: u64,
    pub chain_id: u64,
}

/// Build the legacy transaction request for a swap.
pub fn build_swap_transaction(params: SwapTxParams) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(params.from)
        .with_to(params.order.router)
        .with_input(params.order.calldata)
        .with_value(params.order.value)
        .with_gas_limit(params.gas_limit)
        .with_gas_price(params.gas_price)
        .with_nonce(params.nonce)
        .with_chain_id(params.chain_id)
}

/// Executes router swaps for one wallet on one chain.
pub struct SwapExecutor {
    client: BlockchainClient,
    wallet: Wallet,
    chain_id: u64,
    gas_limit: u64,
    receipt_timeout: Duration,
}

impl SwapExecutor {
    pub fn new(client: BlockchainClient, wallet: Wallet, chain_id: u64) -> Self {
        Self {
            client,
            wallet,
            chain_id,
            gas_limit: DEFAULT_GAS_LIMIT,
            receipt_timeout: Duration::from_secs(120),
        }
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn with_receipt_timeout(mut self, receipt_timeout: Duration) -> Self {
        self.receipt_timeout = receipt_timeout;
        self
    }

    /// Fund check, sign, broadcast and wait for the receipt.
    pub async fn execute(&self, order: SwapOrder) -> BlockchainResult<SwapReceipt> {
        let from = self.wallet.address();

        let gas_price = self.client.get_gas_price().await?;
        let balance = self.client.get_balance(from).await?;
        let required = required_funds(order.value, gas_price, self.gas_limit);

        tracing::debug!(
            account = %from,
            router = %order.router,
            calldata_len = order.calldata.len(),
            value = %order.value,
            gas_price = gas_price,
            gas_limit = self.gas_limit,
            balance = %balance,
            required = %required,
            chain_id = self.chain_id,
            "Preparing swap transaction"
        );

        ensure_sufficient_balance(balance, required)?;

        let nonce = self.client.get_transaction_count(from).await?;
        let tx = build_swap_transaction(SwapTxParams {
            from,
            order,
            gas_price,
            gas_limit: self.gas_limit,
            nonce,
            chain_id: self.chain_id,
        });

        let envelope = self.wallet.sign_transaction(tx).await?;
        let raw = envelope.encoded_2718();

        let receipt = self.client.send_raw_and_wait(&raw, self.receipt_timeout).await?;
        let result = SwapReceipt {
            transaction_hash: receipt.transaction_hash,
            status: receipt.status(),
            gas_used: receipt.gas_used,
            block_number: receipt.block_number,
        };

        tracing::info!(
            tx_hash = %result.transaction_hash,
            status = result.status,
            gas_used = result.gas_used,
            block_number = ?result.block_number,
            "Swap transaction mined"
        );

        Ok(result)
    }
}
