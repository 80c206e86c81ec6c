//! HTTP client for the external router and price services.
//!
//! # Responsibilities
//! - Shape quote bodies (receiver, integrator id, permit flag)
//! - Attach the `x-api-key` header
//! - Bound every call with a timeout and retry transient failures

use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::{RetryConfig, RouterConfig};
use crate::observability::metrics;
use crate::resilience::{is_retryable_error, is_retryable_status, RetryPolicy, Retryable};
use crate::router::types::{RouterQuote, RouterQuoteRequest, TokenPrice, TokenPriceRequest};

/// Header carrying the router API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Errors talking to the router or price service.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("{service} service unreachable: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error fetching {service}: {reason}")]
    Status {
        service: &'static str,
        status: StatusCode,
        reason: String,
    },

    #[error("invalid {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

impl Retryable for RouterError {
    fn is_retryable(&self) -> bool {
        match self {
            RouterError::Transport { source, .. } => is_retryable_error(source),
            RouterError::Status { status, .. } => is_retryable_status(*status),
            RouterError::Client(_) | RouterError::Decode { .. } => false,
        }
    }
}

/// Router service client.
#[derive(Debug, Clone)]
pub struct RouterClient {
    http: Client,
    quote_url: String,
    price_url: String,
    api_key: String,
    unique_pid: String,
    retry: RetryPolicy,
}

impl RouterClient {
    pub fn new(config: &RouterConfig, retries: &RetryConfig) -> Result<Self, RouterError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RouterError::Client(e.to_string()))?;

        if config.api_key.is_empty() {
            tracing::warn!("Router API key is empty, quotes will likely be rejected");
        }

        Ok(Self {
            http,
            quote_url: config.quote_url.clone(),
            price_url: config.price_url.clone(),
            api_key: config.api_key.clone(),
            unique_pid: config.unique_pid.clone(),
            retry: RetryPolicy::from_config(retries),
        })
    }

    /// Build a quote body for a swap whose output goes back to the user.
    pub fn quote_request(
        &self,
        chain_key: &str,
        user_address: &str,
        input_token: &str,
        output_token: &str,
        input_amount: &str,
    ) -> RouterQuoteRequest {
        RouterQuoteRequest {
            chain_id: chain_key.to_string(),
            user_address: user_address.to_string(),
            output_receiver: user_address.to_string(),
            unique_pid: self.unique_pid.clone(),
            input_token: input_token.to_string(),
            output_token: output_token.to_string(),
            input_amount: input_amount.to_string(),
            is_permit2: false,
        }
    }

    /// Ask the router for a route.
    ///
    /// A router-level rejection is returned as `Ok`; use
    /// [`RouterQuote::into_route`] to tell the cases apart.
    pub async fn fetch_quote(&self, body: &RouterQuoteRequest) -> Result<RouterQuote, RouterError> {
        let start = Instant::now();
        let result = self.retry.run("quote", || self.post_quote(body)).await;
        metrics::record_upstream("quote", result.is_ok(), start);

        if let Ok(quote) = &result {
            tracing::debug!(
                chain = %body.chain_id,
                status_code = quote.status_code,
                has_route = quote.result.is_some(),
                "Router quote received"
            );
        }
        result
    }

    async fn post_quote(&self, body: &RouterQuoteRequest) -> Result<RouterQuote, RouterError> {
        let response = self
            .http
            .post(&self.quote_url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|source| RouterError::Transport { service: "quote", source })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| RouterError::Transport { service: "quote", source })?;

        let parsed = serde_json::from_str::<RouterQuote>(&text);
        if status.is_success() {
            return parsed.map_err(|e| RouterError::Decode {
                service: "quote",
                message: e.to_string(),
            });
        }

        // Rejections often arrive as 4xx with the usual JSON body.
        match parsed {
            Ok(quote) if quote.error.is_some() && !is_retryable_status(status) => Ok(quote),
            _ => Err(RouterError::Status {
                service: "quote",
                status,
                reason: status.canonical_reason().unwrap_or("unknown status").to_string(),
            }),
        }
    }

    /// Look up exchange rates for a batch of token pairs.
    pub async fn fetch_prices(
        &self,
        requests: &[TokenPriceRequest],
    ) -> Result<Vec<TokenPrice>, RouterError> {
        let start = Instant::now();
        let result = self.retry.run("price", || self.post_prices(requests)).await;
        metrics::record_upstream("price", result.is_ok(), start);
        result
    }

    async fn post_prices(
        &self,
        requests: &[TokenPriceRequest],
    ) -> Result<Vec<TokenPrice>, RouterError> {
        let response = self
            .http
            .post(&self.price_url)
            .json(requests)
            .send()
            .await
            .map_err(|source| RouterError::Transport { service: "price", source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouterError::Status {
                service: "price",
                status,
                reason: status.canonical_reason().unwrap_or("unknown status").to_string(),
            });
        }

        response
            .json::<Vec<TokenPrice>>()
            .await
            .map_err(|e| RouterError::Decode {
                service: "price",
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RouterClient {
        let config = RouterConfig {
            unique_pid: "pid-1".into(),
            ..RouterConfig::default()
        };
        RouterClient::new(&config, &RetryConfig::default()).unwrap()
    }

    #[test]
    fn test_quote_request_shape() {
        let body = client().quote_request("arbitrum", "0xUser", "0xIn", "0xOut", "1000");
        assert_eq!(body.output_receiver, "0xUser");
        assert_eq!(body.unique_pid, "pid-1");
        assert_eq!(body.chain_id, "arbitrum");
        assert!(!body.is_permit2);
    }

    #[test]
    fn test_status_error_message() {
        let err = RouterError::Status {
            service: "price",
            status: StatusCode::BAD_GATEWAY,
            reason: "Bad Gateway".into(),
        };
        assert_eq!(err.to_string(), "Error fetching price: Bad Gateway");
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_unreachable_router() {
        let config = RouterConfig {
            quote_url: "http://127.0.0.1:9/v1/quote".into(),
            timeout_secs: 2,
            ..RouterConfig::default()
        };
        let retries = RetryConfig {
            enabled: false,
            ..RetryConfig::default()
        };
        let client = RouterClient::new(&config, &retries).unwrap();
        let body = client.quote_request("ethereum", "0x1", "0x2", "0x3", "1");

        let err = client.fetch_quote(&body).await.unwrap_err();
        assert!(matches!(err, RouterError::Transport { service: "quote", .. }));
    }
}
