//! Common helper functions for API handlers.
//!
//! Every response follows the API Gateway proxy shape
//! `{statusCode, headers, body, isBase64Encoded}` and carries CORS headers.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use crate::errors::SynapseError;

pub const PREFLIGHT_MAX_AGE: &str = "86400";

// ============================================================================
// Response Builders
// ============================================================================

/// Returns a 200 CORS preflight response advertising `allowed_methods`.
#[must_use]
pub fn preflight(allowed_methods: &str) -> Value {
    json!({
        "statusCode": 200,
        "headers": {
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Methods": allowed_methods,
            "Access-Control-Allow-Headers": "Content-Type",
            "Access-Control-Max-Age": PREFLIGHT_MAX_AGE
        },
        "body": "",
        "isBase64Encoded": false
    })
}

/// Returns a JSON response with the given status code and serialised body.
#[must_use]
pub fn json_response(status_code: u16, body: &Value) -> Value {
    json!({
        "statusCode": status_code,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*"
        },
        "body": body.to_string(),
        "isBase64Encoded": false
    })
}

/// Returns a 200 OK response carrying `payload` as JSON.
#[must_use]
pub fn ok_json<T: Serialize>(payload: &T) -> Value {
    match serde_json::to_value(payload) {
        Ok(body) => json_response(200, &body),
        Err(e) => {
            error!("Failed to serialise response payload: {}", e);
            err_response(500, &e.to_string())
        }
    }
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, &json!({ "error": message }))
}

/// Maps a handler error onto its status code.
#[must_use]
pub fn error_to_response(err: &SynapseError) -> Value {
    err_response(err.status_code(), &err.to_string())
}

#[must_use]
pub fn method_not_allowed() -> Value {
    err_response(405, "Method not allowed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflight_has_empty_body_and_cors_headers() {
        let v = preflight("POST, OPTIONS");
        assert_eq!(v["statusCode"], 200);
        assert_eq!(v["body"], "");
        assert_eq!(v["headers"]["Access-Control-Allow-Methods"], "POST, OPTIONS");
        assert_eq!(v["headers"]["Access-Control-Max-Age"], "86400");
    }

    #[test]
    fn err_response_wraps_message() {
        let v = err_response(400, "Text is required");
        assert_eq!(v["statusCode"], 400);
        assert_eq!(v["headers"]["Content-Type"], "application/json");
        let body: Value = serde_json::from_str(v["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["error"], "Text is required");
    }

    #[test]
    fn invalid_request_maps_to_400() {
        let v = error_to_response(&SynapseError::InvalidRequest("bad".into()));
        assert_eq!(v["statusCode"], 400);
        let v = error_to_response(&SynapseError::RenderError("boom".into()));
        assert_eq!(v["statusCode"], 500);
    }
}
