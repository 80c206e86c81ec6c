use serde::{Deserialize, Serialize};

/// Body of `POST /api/quote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    pub input_token: String,
    pub output_token: String,
    /// Amount in the input token's base units.
    pub input_amount: String,
    pub user_address: String,
    /// Router chain key, e.g. `"arbitrum"`.
    #[serde(rename = "chainID")]
    pub chain_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub router: String,
    pub calldata: String,
    pub input_amount: String,
    pub output_amount: String,
}

/// Body of `POST /api/swap`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapParams {
    pub calldata: String,
    pub router_address: String,
    /// Native value in wei, decimal.
    pub value: String,
    pub chain_id: u64,
    pub user_address: String,
    pub private_key: String,
}

impl std::fmt::Debug for SwapParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapParams")
            .field("router_address", &self.router_address)
            .field("value", &self.value)
            .field("chain_id", &self.chain_id)
            .field("user_address", &self.user_address)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResult {
    pub transaction_hash: String,
    pub status: bool,
    pub gas_used: String,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub explorer_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub id: u64,
    pub name: String,
    /// Router chain key.
    pub chain_id: String,
    pub native_currency: String,
    #[serde(default)]
    pub explorer: String,
    #[serde(default)]
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub name: String,
    pub address: String,
    pub decimals: u8,
}

/// One pair in a price lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRequest {
    pub domestic_blockchain: String,
    pub domestic_token: String,
    pub foreign_blockchain: String,
    pub foreign_token: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenPrice {
    pub domestic_blockchain: String,
    pub domestic_token: String,
    pub foreign_blockchain: String,
    pub foreign_token: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_params_debug_hides_key() {
        let params = SwapParams {
            calldata: "0x".into(),
            router_address: "0xrouter".into(),
            value: "1".into(),
            chain_id: 1,
            user_address: "0xme".into(),
            private_key: "secret-key".into(),
        };
        assert!(!format!("{:?}", params).contains("secret-key"));

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["routerAddress"], "0xrouter");
        assert_eq!(json["chainId"], 1);
        assert_eq!(json["privateKey"], "secret-key");
    }

    #[test]
    fn test_quote_params_chain_field() {
        let params = QuoteParams {
            input_token: "0xin".into(),
            output_token: "0xout".into(),
            input_amount: "100".into(),
            user_address: "0xme".into(),
            chain_id: "base".into(),
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["chainID"], "base");
        assert_eq!(json["inputAmount"], "100");
    }
}
