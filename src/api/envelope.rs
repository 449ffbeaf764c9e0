//! Helpers for the provider response envelope.
//!
//! Successful payloads live under `Response`; failures show up either as
//! `Response.Error.{Code,Message}` (even on HTTP 200), a top-level `Message`,
//! or the backend's own `{"error", "details"}` body.

use serde_json::Value;

use super::error::ApiError;

/// The object holding result fields: `Response` when present, the root otherwise.
pub fn response_body(payload: &Value) -> &Value {
    payload.get("Response").unwrap_or(payload)
}

/// Error object embedded in a response envelope, if any.
pub fn embedded_error(payload: &Value) -> Option<ApiError> {
    let error = payload.get("Response").and_then(|r| r.get("Error"))?;
    let code = error
        .get("Code")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());
    let message = error
        .get("Message")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
        .or_else(|| code.clone())
        .unwrap_or_else(|| "The provisioning API reported an error".to_string());
    Some(ApiError::Application { code, message })
}

/// Most specific human-readable message found anywhere in the payload.
pub fn extract_error_message(payload: &Value) -> Option<String> {
    if let Some(msg) = payload
        .get("Response")
        .and_then(|r| r.get("Error"))
        .and_then(|e| e.get("Message"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
    {
        return Some(msg.to_string());
    }
    if let Some(msg) = payload
        .get("Message")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
    {
        return Some(msg.to_string());
    }
    let error = payload
        .get("error")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())?;
    match payload.get("details").and_then(|v| v.as_str()) {
        Some(details) if !details.trim().is_empty() => Some(format!("{}: {}", error, details)),
        _ => Some(error.to_string()),
    }
}

/// Read a string field, accepting numbers as well.
pub fn str_field(obj: &Value, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
