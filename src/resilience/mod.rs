//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to router / price service:
//!     → reqwest client timeout bounds each attempt
//!     → On failure: retries.rs decides if retryable
//!     → backoff.rs computes the jittered delay before the next attempt
//! ```

pub mod backoff;
pub mod retries;

pub use backoff::calculate_backoff;
pub use retries::{is_retryable_error, is_retryable_status, RetryPolicy, Retryable};
