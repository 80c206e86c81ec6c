use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::types::{
    ChainInfo, Health, PriceRequest, Quote, QuoteParams, SwapParams, SwapResult, TokenInfo,
    TokenPrice,
};

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with an error body.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Typed client for a running gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
}

impl GatewayClient {
    /// `base_url` is the server root, e.g. `http://localhost:3001`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Request an executable route for a swap.
    pub async fn get_quote(&self, params: &QuoteParams) -> Result<Quote, SdkError> {
        let resp = self.client.post(self.url("/quote")).json(params).send().await?;
        unwrap_envelope(resp).await
    }

    /// Have the gateway sign and broadcast router calldata.
    ///
    /// Blocks until the transaction is mined.
    pub async fn execute_swap(&self, params: &SwapParams) -> Result<SwapResult, SdkError> {
        let resp = self.client.post(self.url("/swap")).json(params).send().await?;
        unwrap_envelope(resp).await
    }

    pub async fn supported_chains(&self) -> Result<Vec<ChainInfo>, SdkError> {
        let resp = self.client.get(self.url("/chains")).send().await?;
        unwrap_envelope(resp).await
    }

    pub async fn supported_tokens(&self, chain_key: &str) -> Result<Vec<TokenInfo>, SdkError> {
        let resp = self
            .client
            .get(self.url(&format!("/tokens/{}", chain_key)))
            .send()
            .await?;
        unwrap_envelope(resp).await
    }

    pub async fn prices(&self, requests: &[PriceRequest]) -> Result<Vec<TokenPrice>, SdkError> {
        let body = serde_json::json!({ "requests": requests });
        let resp = self.client.post(self.url("/prices")).json(&body).send().await?;
        unwrap_envelope(resp).await
    }

    /// Liveness. Not wrapped in the envelope.
    pub async fn health(&self) -> Result<Health, SdkError> {
        let resp = self.client.get(self.url("/health")).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }
        serde_json::from_str(&text).map_err(|e| SdkError::Decode(e.to_string()))
    }
}

fn api_error(status: u16, text: &str) -> SdkError {
    let message = serde_json::from_str::<ErrorBody>(text)
        .map(|body| body.error)
        .unwrap_or_else(|_| format!("gateway returned status {}", status));
    SdkError::Api { status, message }
}

async fn unwrap_envelope<T: DeserializeOwned>(resp: Response) -> Result<T, SdkError> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(api_error(status.as_u16(), &text));
    }

    let envelope: Envelope<T> =
        serde_json::from_str(&text).map_err(|e| SdkError::Decode(e.to_string()))?;
    match envelope {
        Envelope {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        Envelope { error, .. } => Err(SdkError::Api {
            status: status.as_u16(),
            message: error.unwrap_or_else(|| "request was not successful".to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = GatewayClient::new("http://localhost:3001/");
        assert_eq!(client.base_url(), "http://localhost:3001");
        assert_eq!(client.url("/tokens/base"), "http://localhost:3001/api/tokens/base");
    }

    #[test]
    fn test_api_error_message() {
        match api_error(400, r#"{"error":"Missing required fields"}"#) {
            SdkError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Missing required fields");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = api_error(502, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), "gateway returned status 502");
    }
}
