//! Static chain and token tables.
//!
//! The tables are hand-maintained. Configuration may only replace a chain's
//! RPC URL; it cannot add chains or tokens.

pub mod chains;
pub mod tokens;

use std::collections::BTreeMap;

pub use chains::{BuiltinChain, Chain, BUILTIN_CHAINS};
pub use tokens::{tokens_for, usdc_address, Token, NATIVE_TOKEN_ADDRESS};

/// Lookup tables for chains and their tokens.
#[derive(Debug, Clone)]
pub struct Registry {
    chains: Vec<Chain>,
}

impl Registry {
    /// The built-in table with its default RPC URLs.
    pub fn builtin() -> Self {
        Self {
            chains: BUILTIN_CHAINS.iter().map(Chain::from).collect(),
        }
    }

    /// The built-in table with RPC URLs replaced per chain key.
    pub fn with_rpc_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut registry = Self::builtin();
        for chain in &mut registry.chains {
            if let Some(url) = overrides.get(&chain.key) {
                chain.rpc_url = url.clone();
            }
        }
        registry
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chain_by_key(&self, key: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.key == key)
    }

    pub fn chain_by_id(&self, id: u64) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    /// Tokens listed for a chain key.
    pub fn tokens(&self, chain_key: &str) -> Option<&'static [Token]> {
        tokens_for(chain_key)
    }

    /// The chain key the router expects for a numeric chain id.
    ///
    /// Unknown ids are passed through as their decimal form.
    pub fn api_chain_key(&self, chain_id: u64) -> String {
        self.chain_by_id(chain_id)
            .map(|c| c.key.clone())
            .unwrap_or_else(|| chain_id.to_string())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
