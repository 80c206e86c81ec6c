//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, state snapshot)
//!     → request.rs (request id, body field extraction)
//!     → quote.rs / swap.rs / catalog.rs (handlers)
//!     → response.rs (success envelope or error body)
//!     → Send to client
//! ```

pub mod catalog;
pub mod quote;
pub mod request;
pub mod response;
pub mod server;
pub mod swap;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::{ApiError, ApiResponse};
pub use server::{AppState, HttpServer};
