//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and clients produce:
//!     → logging.rs (structured tracing events, pretty or JSON)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
