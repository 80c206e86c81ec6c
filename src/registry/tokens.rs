//! Built-in token lists.

use serde::Serialize;

/// Address the router uses for a chain's native coin.
pub const NATIVE_TOKEN_ADDRESS: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";

/// Ethereum mainnet USDC, used when a chain has no USDC entry.
pub const MAINNET_USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

/// A token as listed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub symbol: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub decimals: u8,
}

const fn native(symbol: &'static str, name: &'static str) -> Token {
    Token {
        symbol,
        name,
        address: NATIVE_TOKEN_ADDRESS,
        decimals: 18,
    }
}

const fn usdc(address: &'static str) -> Token {
    Token {
        symbol: "USDC",
        name: "USD Coin",
        address,
        decimals: 6,
    }
}

/// Token list per chain key.
pub const BUILTIN_TOKENS: &[(&str, &[Token])] = &[
    (
        "arbitrum",
        &[
            native("ETH", "Ethereum"),
            usdc("0xFF970A61A04b1cA14834A43f5dE4533eBDDB5CC8"),
        ],
    ),
    (
        "avalanche",
        &[
            native("AVAX", "Avalanche"),
            usdc("0xB97EF9Ef8734C71904D8002F8b6Bc66Dd9c48a6E"),
        ],
    ),
    (
        "base",
        &[
            native("ETH", "Ethereum"),
            usdc("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
        ],
    ),
    (
        "berachain",
        &[
            native("BERA", "Berachain"),
            usdc("0x4200000000000000000000000000000000000022"),
        ],
    ),
    (
        "blast",
        &[
            native("ETH", "Ethereum"),
            usdc("0x4300000000000000000000000000000000000003"),
        ],
    ),
    (
        "bnb",
        &[
            native("BNB", "BNB"),
            // Binance-peg USDC carries 18 decimals.
            Token {
                symbol: "USDC",
                name: "USD Coin",
                address: "0x8ac76a51cc950d9822d68b83fe1ad97b32cd580d",
                decimals: 18,
            },
        ],
    ),
    (
        "ethereum",
        &[
            native("ETH", "Ethereum"),
            usdc(MAINNET_USDC),
            Token {
                symbol: "USDT",
                name: "Tether USD",
                address: "0xdAC17F958D2ee523a2206206994597C13D831ec7",
                decimals: 6,
            },
            Token {
                symbol: "WETH",
                name: "Wrapped Ether",
                address: "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
                decimals: 18,
            },
        ],
    ),
    (
        "gnosis",
        &[
            native("xDAI", "xDAI"),
            usdc("0xDDAfbb505ad214D7b80b1f830fcCc89B60fb7A83"),
        ],
    ),
    (
        "hyperevm",
        &[
            native("HYPE", "Hyperliquid"),
            usdc("0xb88339CB7199b77E23DB6E890353E22632Ba630f"),
        ],
    ),
    (
        "linea",
        &[
            native("ETH", "Ethereum"),
            usdc("0xb23ab7Ef65e52b6eF94Bc6200b828ef70e9AEE15"),
        ],
    ),
    (
        "mantle",
        &[
            native("MNT", "Mantle"),
            usdc("0x8DafcF7cE011506B0aBB0b28821DB8d6AcE5a5C5"),
        ],
    ),
    (
        "optimism",
        &[
            native("ETH", "Ethereum"),
            usdc("0x0b2C639c533813f4Aa9D7837CAf62653d097Ff85"),
        ],
    ),
    (
        "polygon",
        &[
            native("MATIC", "Polygon"),
            usdc("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
        ],
    ),
    (
        "scroll",
        &[
            native("ETH", "Ethereum"),
            usdc("0x22CA6cF47cE238d7b9b36676E1fE6F9C0aA97914"),
        ],
    ),
    (
        "sepolia",
        &[
            native("ETH", "Ethereum"),
            usdc("0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238"),
        ],
    ),
    (
        "sonic",
        &[
            native("S", "Sonic"),
            usdc("0x29219dd400f2Bf60E5a23d13Be72B486D4038894"),
        ],
    ),
    (
        "taiko",
        &[
            native("ETH", "Ethereum"),
            usdc("0xF5Bf3A5a8016821F4389646433194E19709F5CEE"),
        ],
    ),
    (
        "unichain",
        &[
            native("ETH", "Ethereum"),
            usdc("0x078D782b760474a361dDA0AF3839290b0EF57AD6"),
        ],
    ),
];

/// Tokens listed for a chain key.
pub fn tokens_for(chain_key: &str) -> Option<&'static [Token]> {
    BUILTIN_TOKENS
        .iter()
        .find(|(key, _)| *key == chain_key)
        .map(|(_, tokens)| *tokens)
}

/// USDC address on a chain, falling back to mainnet USDC.
pub fn usdc_address(chain_key: &str) -> &'static str {
    tokens_for(chain_key)
        .and_then(|tokens| tokens.iter().find(|t| t.symbol == "USDC"))
        .map(|t| t.address)
        .unwrap_or(MAINNET_USDC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::chains::BUILTIN_CHAINS;

    #[test]
    fn test_every_chain_has_a_native_token_first() {
        for chain in BUILTIN_CHAINS {
            let tokens = tokens_for(chain.key).expect(chain.key);
            assert_eq!(tokens[0].address, NATIVE_TOKEN_ADDRESS);
            assert_eq!(tokens[0].symbol, chain.native_currency);
        }
    }

    #[test]
    fn test_every_chain_lists_usdc() {
        for chain in BUILTIN_CHAINS {
            let tokens = tokens_for(chain.key).expect(chain.key);
            assert_eq!(tokens[1].symbol, "USDC", "{}", chain.key);
            assert_eq!(usdc_address(chain.key), tokens[1].address);
        }
    }

    #[test]
    fn test_usdc_lookup() {
        assert_eq!(
            usdc_address("sepolia"),
            "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238"
        );
        assert_eq!(
            usdc_address("unichain"),
            "0x078D782b760474a361dDA0AF3839290b0EF57AD6"
        );
        assert_eq!(usdc_address("atlantis"), MAINNET_USDC);
    }
}
