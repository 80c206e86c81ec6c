//! Response envelope and API errors.
//!
//! Successful calls answer `{"success": true, "data": ...}`. Failures answer
//! `{"error": "<message>"}` with a 4xx or 5xx status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::blockchain::BlockchainError;

/// Message for a POST body lacking a required field.
pub const MISSING_FIELDS: &str = "Missing required fields";

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// An error reported to the API caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself is at fault.
    #[error("{0}")]
    BadRequest(String),

    /// The gateway or something behind it failed.
    #[error("{0}")]
    Internal(String),

    /// The body exceeds `security.max_body_size`.
    #[error("{0}")]
    PayloadTooLarge(String),
}

impl ApiError {
    pub fn missing_fields() -> Self {
        ApiError::BadRequest(MISSING_FIELDS.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m) | ApiError::Internal(m) | ApiError::PayloadTooLarge(m) => m,
        }
    }
}

/// An `{"error": message}` response with `status`.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.message())
    }
}

impl From<BlockchainError> for ApiError {
    fn from(err: BlockchainError) -> Self {
        if err.is_client_error() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}
