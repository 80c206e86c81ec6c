//! Configuration loading from disk and the environment.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::registry::chains::BUILTIN_CHAINS;

/// Environment variable carrying the router API key.
pub const API_KEY_ENV_VAR: &str = "GLUEX_API_KEY";

/// Environment variable overriding the listener port.
pub const PORT_ENV_VAR: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// Environment overrides are applied after parsing, so secrets such as the
/// API key never have to live in the file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: GatewayConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

impl GatewayConfig {
    /// Defaults plus environment overrides, validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        apply_env_overrides(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut GatewayConfig) {
    apply_overrides(config, |name| std::env::var(name).ok());
}

/// Apply overrides from an arbitrary variable source.
///
/// Recognised variables: `PORT`, `GLUEX_API_KEY` and `<CHAIN>_RPC_URL` for
/// every built-in chain key (e.g. `ETHEREUM_RPC_URL`).
pub fn apply_overrides<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup(PORT_ENV_VAR).and_then(|p| p.trim().parse::<u16>().ok()) {
        if let Ok(mut addr) = config.listener.bind_address.parse::<SocketAddr>() {
            addr.set_port(port);
            config.listener.bind_address = addr.to_string();
        }
    }

    if let Some(key) = lookup(API_KEY_ENV_VAR).filter(|k| !k.is_empty()) {
        config.router.api_key = key;
    }

    for chain in BUILTIN_CHAINS {
        let var = rpc_env_var(chain.key);
        if let Some(url) = lookup(&var).filter(|u| !u.is_empty()) {
            config.chains.rpc_urls.insert(chain.key.to_string(), url);
        }
    }
}

/// Name of the RPC override variable for a chain key.
pub fn rpc_env_var(chain_key: &str) -> String {
    format!("{}_RPC_URL", chain_key.to_ascii_uppercase())
}
