//! Configuration validation.
//!
//! Serde handles syntax; this module checks semantics and returns every
//! problem found, not just the first.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::registry::chains::BUILTIN_CHAINS;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("{field} '{value}' is not a valid URL")]
    Url { field: String, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("retries.base_delay_ms ({base}) exceeds retries.max_delay_ms ({max})")]
    BackoffRange { base: u64, max: u64 },

    #[error("chains.rpc_urls names unknown chain '{0}'")]
    UnknownChain(String),
}

/// Validate a configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    check_url(&mut errors, "router.quote_url", &config.router.quote_url);
    check_url(&mut errors, "router.price_url", &config.router.price_url);

    for (field, value) in [
        ("timeouts.request_secs", config.timeouts.request_secs),
        ("router.timeout_secs", config.router.timeout_secs),
        ("blockchain.rpc_timeout_secs", config.blockchain.rpc_timeout_secs),
        ("blockchain.gas_limit", config.blockchain.gas_limit),
        ("blockchain.receipt_timeout_secs", config.blockchain.receipt_timeout_secs),
        ("retries.max_attempts", config.retries.max_attempts as u64),
        ("security.max_body_size", config.security.max_body_size as u64),
    ] {
        if value == 0 {
            errors.push(ValidationError::Zero(field));
        }
    }

    if config.retries.base_delay_ms > config.retries.max_delay_ms {
        errors.push(ValidationError::BackoffRange {
            base: config.retries.base_delay_ms,
            max: config.retries.max_delay_ms,
        });
    }

    for (key, url) in &config.chains.rpc_urls {
        if !BUILTIN_CHAINS.iter().any(|c| c.key == key) {
            errors.push(ValidationError::UnknownChain(key.clone()));
        } else {
            check_url(&mut errors, &format!("chains.rpc_urls.{key}"), url);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if url::Url::parse(value).is_err() {
        errors.push(ValidationError::Url {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}
