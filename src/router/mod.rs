//! External router service integration.
//!
//! The router computes routes and calldata; this module only shapes
//! requests and decodes responses.

pub mod client;
pub mod types;

pub use client::{RouterClient, RouterError, API_KEY_HEADER};
pub use types::{QuoteRoute, RouterQuote, RouterQuoteRequest, TokenPrice, TokenPriceRequest};
