//! Built-in chain table.

/// A compile-time chain record.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinChain {
    /// Router-facing chain key.
    pub key: &'static str,
    pub id: u64,
    pub name: &'static str,
    pub native_currency: &'static str,
    /// Public RPC endpoint; empty when the chain needs a keyed provider.
    pub rpc_url: &'static str,
    pub explorer: &'static str,
    pub logo: &'static str,
}

/// Every chain the gateway knows about, sorted by key.
pub const BUILTIN_CHAINS: &[BuiltinChain] = &[
    BuiltinChain {
        key: "arbitrum",
        id: 42161,
        name: "Arbitrum One",
        native_currency: "ETH",
        rpc_url: "https://arb1.arbitrum.io/rpc",
        explorer: "https://arbiscan.io",
        logo: "/public/arbitrium.png",
    },
    BuiltinChain {
        key: "avalanche",
        id: 43114,
        name: "Avalanche C-Chain",
        native_currency: "AVAX",
        rpc_url: "https://api.avax.network/ext/bc/C/rpc",
        explorer: "https://snowtrace.io",
        logo: "/public/Ethereum.png",
    },
    BuiltinChain {
        key: "base",
        id: 8453,
        name: "Base",
        native_currency: "ETH",
        rpc_url: "https://mainnet.base.org",
        explorer: "https://basescan.org",
        logo: "/public/Ethereum.png",
    },
    BuiltinChain {
        key: "berachain",
        id: 80094,
        name: "Berachain",
        native_currency: "BERA",
        rpc_url: "https://rpc.berachain.com",
        explorer: "https://berascan.com",
        logo: "/public/Ethereum.png",
    },
    BuiltinChain {
        key: "blast",
        id: 81457,
        name: "Blast",
        native_currency: "ETH",
        rpc_url: "https://rpc.blast.io",
        explorer: "https://blastscan.io",
        logo: "/public/Ethereum.png",
    },
    BuiltinChain {
        key: "bnb",
        id: 56,
        name: "BNB Smart Chain",
        native_currency: "BNB",
        rpc_url: "https://bsc-dataseed.binance.org/",
        explorer: "https://bscscan.com",
        logo: "/public/Ethereum.png",
    },
    BuiltinChain {
        key: "ethereum",
        id: 1,
        name: "Ethereum",
        native_currency: "ETH",
        rpc_url: "",
        explorer: "https://etherscan.io",
        logo: "/public/Ethereum.png",
    },
    BuiltinChain {
        key: "gnosis",
        id: 100,
        name: "Gnosis Chain",
        native_currency: "xDAI",
        rpc_url: "https://rpc.gnosischain.com",
        explorer: "https://gnosisscan.io",
        logo: "/public/Ethereum.png",
    },
    BuiltinChain {
        key: "hyperevm",
        id: 999,
        name: "HyperEVM",
        native_currency: "HYPE",
        rpc_url: "https://rpc.hyperevm.io",
        explorer: "https://hyperscan.io",
        logo: "/public/arbitrium.png",
    },
    BuiltinChain {
        key: "linea",
        id: 59144,
        name: "Linea",
        native_currency: "ETH",
        rpc_url: "https://rpc.linea.build",
        explorer: "https://lineascan.build",
        logo: "/public/arbitrium.png",
    },
    BuiltinChain {
        key: "mantle",
        id: 5000,
        name: "Mantle",
        native_currency: "MNT",
        rpc_url: "https://rpc.mantle.xyz",
        explorer: "https://explorer.mantle.xyz",
        logo: "/public/sonic.png",
    },
    BuiltinChain {
        key: "optimism",
        id: 10,
        name: "Optimism",
        native_currency: "ETH",
        rpc_url: "https://mainnet.optimism.io",
        explorer: "https://optimistic.etherscan.io",
        logo: "/public/arbitrium.png",
    },
    BuiltinChain {
        key: "polygon",
        id: 137,
        name: "Polygon",
        native_currency: "MATIC",
        rpc_url: "https://polygon-rpc.com",
        explorer: "https://polygonscan.com",
        logo: "/public/sonic.png",
    },
    BuiltinChain {
        key: "scroll",
        id: 534352,
        name: "Scroll",
        native_currency: "ETH",
        rpc_url: "https://rpc.scroll.io",
        explorer: "https://scrollscan.com",
        logo: "/public/sonic.png",
    },
    BuiltinChain {
        key: "sepolia",
        id: 11155111,
        name: "Sepolia",
        native_currency: "ETH",
        rpc_url: "",
        explorer: "https://sepolia.etherscan.io",
        logo: "/public/Ethereum.png",
    },
    BuiltinChain {
        key: "sonic",
        id: 146,
        name: "Sonic",
        native_currency: "S",
        rpc_url: "https://rpc.soniclabs.com",
        explorer: "https://sonicscan.io",
        logo: "/public/arbitrium.png",
    },
    BuiltinChain {
        key: "taiko",
        id: 167000,
        name: "Taiko",
        native_currency: "ETH",
        rpc_url: "https://rpc.mainnet.taiko.xyz",
        explorer: "https://taikoscan.io",
        logo: "/public/sonic.png",
    },
    BuiltinChain {
        key: "unichain",
        id: 130,
        name: "Unichain",
        native_currency: "ETH",
        rpc_url: "https://rpc.unichain.org",
        explorer: "https://uniscan.org",
        logo: "/public/sonic.png",
    },
];

/// A chain as served by the registry, with its effective RPC URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub key: String,
    pub id: u64,
    pub name: String,
    pub native_currency: String,
    pub rpc_url: String,
    pub explorer: String,
    pub logo: String,
}

impl From<&BuiltinChain> for Chain {
    fn from(entry: &BuiltinChain) -> Self {
        Self {
            key: entry.key.to_string(),
            id: entry.id,
            name: entry.name.to_string(),
            native_currency: entry.native_currency.to_string(),
            rpc_url: entry.rpc_url.to_string(),
            explorer: entry.explorer.to_string(),
            logo: entry.logo.to_string(),
        }
    }
}

impl Chain {
    /// Whether a usable RPC endpoint is known for this chain.
    pub fn has_rpc(&self) -> bool {
        !self.rpc_url.trim().is_empty()
    }

    /// Explorer page for a transaction.
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer.trim_end_matches('/'), tx_hash)
    }

    /// Explorer page showing `holder`'s balance of `token`.
    pub fn token_holder_url(&self, token: &str, holder: &str) -> String {
        format!(
            "{}/token/{}?a={}",
            self.explorer.trim_end_matches('/'),
            token,
            holder
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_and_ids_are_unique() {
        let keys: HashSet<_> = BUILTIN_CHAINS.iter().map(|c| c.key).collect();
        let ids: HashSet<_> = BUILTIN_CHAINS.iter().map(|c| c.id).collect();
        assert_eq!(keys.len(), BUILTIN_CHAINS.len());
        assert_eq!(ids.len(), BUILTIN_CHAINS.len());
    }

    #[test]
    fn test_explorer_urls() {
        let bnb = Chain::from(BUILTIN_CHAINS.iter().find(|c| c.key == "bnb").unwrap());
        assert_eq!(bnb.tx_url("0xabc"), "https://bscscan.com/tx/0xabc");

        let eth = Chain::from(BUILTIN_CHAINS.iter().find(|c| c.key == "ethereum").unwrap());
        assert_eq!(
            eth.token_holder_url("0xusdc", "0xme"),
            "https://etherscan.io/token/0xusdc?a=0xme"
        );
        assert!(!eth.has_rpc());
    }
}
