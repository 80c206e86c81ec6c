//! Request identification and body field extraction.
//!
//! Every request gets an `x-request-id` (UUID v4) unless the client sent
//! one. The id is echoed on the response and attached to the trace span.

use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderName, Request, StatusCode},
    Json,
};
use serde_json::Value;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::response::ApiError;

/// Header carrying the request id.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        id.parse().ok().map(RequestId::new)
    }
}

/// Request id of `request`, or `"-"` when none is set.
pub fn request_id_of<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
}

/// The JSON body of a POST, or an empty object when the body is absent,
/// not JSON or sent with another content type. Field checks then decide the
/// error. Only an oversized body is rejected outright.
pub fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(ApiError::PayloadTooLarge(rejection.body_text()))
        }
        Err(rejection) => {
            tracing::debug!(
                reason = %rejection.body_text(),
                "Unreadable JSON body, treating as empty"
            );
            Ok(Value::Object(Default::default()))
        }
    }
}

/// A required text field. Numbers are accepted and rendered in decimal;
/// missing, null and blank values count as absent.
pub fn required_str(body: &Value, name: &str) -> Option<String> {
    match body.get(name)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_str() {
        let body = json!({"a": "x", "b": "  ", "c": 5, "d": null, "e": true});
        assert_eq!(required_str(&body, "a").as_deref(), Some("x"));
        assert_eq!(required_str(&body, "b"), None);
        assert_eq!(required_str(&body, "c").as_deref(), Some("5"));
        assert_eq!(required_str(&body, "d"), None);
        assert_eq!(required_str(&body, "e"), None);
        assert_eq!(required_str(&body, "missing"), None);
    }

    #[test]
    fn test_make_request_id_is_uuid() {
        let request = Request::new(());
        let id = MakeRequestUuid.make_request_id(&request).unwrap();
        let text = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(text).is_ok());
    }
}
