//! Wire types of the router and price services.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a quote call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterQuoteRequest {
    /// Router chain key, e.g. `"ethereum"`.
    #[serde(rename = "chainID")]
    pub chain_id: String,
    pub user_address: String,
    pub output_receiver: String,
    #[serde(rename = "uniquePID")]
    pub unique_pid: String,
    pub input_token: String,
    pub output_token: String,
    /// Amount in the input token's base units.
    pub input_amount: String,
    pub is_permit2: bool,
}

/// Raw quote response.
///
/// The router reports its own status in the body; HTTP 200 alone does not
/// mean a route was found.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterQuote {
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub result: Option<QuoteRoute>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// Executable part of a successful quote.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRoute {
    /// Contract the calldata must be sent to.
    pub router: String,
    pub calldata: String,
    #[serde(default)]
    pub output_amount: Option<Value>,
}

impl QuoteRoute {
    /// Quoted output in base units, `"0"` when the router omitted it.
    pub fn output_amount(&self) -> String {
        match &self.output_amount {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => "0".to_string(),
        }
    }
}

impl RouterQuote {
    /// The route, or the router's reason for not providing one.
    pub fn into_route(self) -> Result<QuoteRoute, String> {
        match self.result {
            Some(route) if self.status_code == 200 => Ok(route),
            _ => Err(match self.error {
                Some(Value::String(s)) if !s.is_empty() => s,
                Some(Value::Null) | None => "Failed to get quote".to_string(),
                Some(other) => other.to_string(),
            }),
        }
    }
}

/// One pair in an exchange-rate lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPriceRequest {
    pub domestic_blockchain: String,
    pub domestic_token: String,
    pub foreign_blockchain: String,
    pub foreign_token: String,
}

/// An exchange rate: one domestic token is worth `price` foreign tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPrice {
    pub domestic_blockchain: String,
    pub domestic_token: String,
    pub foreign_blockchain: String,
    pub foreign_token: String,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quote_request_field_names() {
        let body = RouterQuoteRequest {
            chain_id: "ethereum".into(),
            user_address: "0xme".into(),
            output_receiver: "0xme".into(),
            unique_pid: "pid".into(),
            input_token: "0xin".into(),
            output_token: "0xout".into(),
            input_amount: "10".into(),
            is_permit2: false,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["chainID"], "ethereum");
        assert_eq!(value["uniquePID"], "pid");
        assert_eq!(value["outputReceiver"], "0xme");
        assert_eq!(value["isPermit2"], false);
    }

    #[test]
    fn test_successful_quote() {
        let quote: RouterQuote = serde_json::from_value(json!({
            "statusCode": 200,
            "result": {
                "router": "0xr",
                "calldata": "0xdead",
                "outputAmount": "123",
                "inputAmount": "1"
            }
        }))
        .unwrap();
        let route = quote.into_route().unwrap();
        assert_eq!(route.router, "0xr");
        assert_eq!(route.output_amount(), "123");
    }

    #[test]
    fn test_numeric_and_missing_output_amount() {
        let route: QuoteRoute =
            serde_json::from_value(json!({"router": "0xr", "calldata": "0x", "outputAmount": 42}))
                .unwrap();
        assert_eq!(route.output_amount(), "42");

        let route: QuoteRoute =
            serde_json::from_value(json!({"router": "0xr", "calldata": "0x"})).unwrap();
        assert_eq!(route.output_amount(), "0");
    }

    #[test]
    fn test_rejections() {
        let quote: RouterQuote =
            serde_json::from_value(json!({"statusCode": 400, "error": "No route"})).unwrap();
        assert_eq!(quote.into_route().unwrap_err(), "No route");

        // A result with a non-200 status is still a rejection.
        let quote: RouterQuote = serde_json::from_value(json!({
            "statusCode": 500,
            "result": {"router": "0xr", "calldata": "0x"}
        }))
        .unwrap();
        assert_eq!(quote.into_route().unwrap_err(), "Failed to get quote");

        let quote: RouterQuote =
            serde_json::from_value(json!({"statusCode": 200})).unwrap();
        assert_eq!(quote.into_route().unwrap_err(), "Failed to get quote");
    }
}
