//! Client SDK for the dex-gateway HTTP API.
//!
//! - [`GatewayClient`]: typed calls, envelope unwrapping
//! - [`to_base_units`] / [`from_base_units`]: exact decimal conversion
//! - [`QuoteRefresher`]: debounced quote refresh for interactive front ends

pub mod client;
pub mod refresher;
pub mod types;
pub mod units;

pub use client::{GatewayClient, SdkError};
pub use refresher::{QuoteForm, QuoteRefresher, QuoteSource, QuoteState};
pub use types::{
    ChainInfo, Health, PriceRequest, Quote, QuoteParams, SwapParams, SwapResult, TokenInfo,
    TokenPrice,
};
pub use units::{from_base_units, to_base_units, UnitsError};
