use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::SynapseError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// HTTP method of a proxy event, upper-cased.
///
/// REST APIs send `httpMethod`, HTTP APIs send `requestContext.http.method`.
pub fn request_method(payload: &Value, default: &str) -> String {
    v_str(payload, &["httpMethod"])
        .or_else(|| v_str(payload, &["requestContext", "http", "method"]))
        .unwrap_or(default)
        .to_ascii_uppercase()
}

/// Raw request body, decoded from base64 when the gateway flagged it.
pub fn extract_body(payload: &Value) -> Result<String, SynapseError> {
    let Some(body) = payload.get("body").and_then(|b| b.as_str()) else {
        return Ok("{}".to_string());
    };

    let encoded = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !encoded {
        return Ok(body.to_string());
    }

    let bytes = STANDARD.decode(body)?;
    String::from_utf8(bytes)
        .map_err(|e| SynapseError::InvalidRequest(format!("Body is not valid UTF-8: {e}")))
}

pub fn parse_json_body<T: DeserializeOwned>(payload: &Value) -> Result<T, SynapseError> {
    let body = extract_body(payload)?;
    let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
    serde_json::from_str(body)
        .map_err(|e| SynapseError::InvalidRequest(format!("Invalid JSON body: {e}")))
}
