//! Response assertions
//!
//! Status codes are always checked exactly. Bodies are decoded as JSON only
//! when a step needs a field from them; a body that is present but malformed
//! is a failure, never silently ignored.

use reqwest::StatusCode;
use serde_json::Value;

use crate::api::ApiResponse;
use crate::common::{Error, Result};

/// Field holding the API's human-readable message
pub const MESSAGE_FIELD: &str = "msg";

/// Whether a body-level check may be skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPolicy {
    /// The body must be present and satisfy the check
    Required,
    /// An empty or whitespace body skips the check
    IfPresent,
}

/// Assert the exact status code
pub fn expect_status(response: &ApiResponse, expected: StatusCode) -> Result<()> {
    if response.status != expected {
        return Err(Error::TestAssertion(format!(
            "Expected status {}, got {}. Response: {}",
            expected,
            response.status,
            response.body_excerpt()
        )));
    }
    Ok(())
}

/// Decode the body as JSON
pub fn decode_json(response: &ApiResponse) -> Result<Value> {
    if !response.has_body() {
        return Err(Error::decoding("response body is empty", &response.body));
    }
    serde_json::from_str(&response.body).map_err(|e| Error::decoding(e, &response.body_excerpt()))
}

/// Extract a non-empty string field from a decoded body
pub fn expect_non_empty_string(json: &Value, field: &str, response: &ApiResponse) -> Result<String> {
    match json.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(Error::TestAssertion(format!(
            "Field '{}' is empty. Response: {}",
            field,
            response.body_excerpt()
        ))),
        Some(other) => Err(Error::TestAssertion(format!(
            "Field '{}' is not a string: {}",
            field, other
        ))),
        None => Err(Error::TestAssertion(format!(
            "Field '{}' missing. Response: {}",
            field,
            response.body_excerpt()
        ))),
    }
}

/// Assert that a string field equals `expected`
///
/// Returns `false` when the check was skipped under [`BodyPolicy::IfPresent`].
pub fn expect_field_equals(
    response: &ApiResponse,
    field: &str,
    expected: &str,
    policy: BodyPolicy,
) -> Result<bool> {
    if policy == BodyPolicy::IfPresent && !response.has_body() {
        return Ok(false);
    }

    let json = decode_json(response)?;
    let actual = expect_non_empty_string(&json, field, response)?;
    if actual != expected {
        return Err(Error::TestAssertion(format!(
            "Field '{}': expected '{}', got '{}'",
            field, expected, actual
        )));
    }
    Ok(true)
}

/// Assert that the `msg` field equals `expected`
pub fn expect_message(response: &ApiResponse, expected: &str, policy: BodyPolicy) -> Result<bool> {
    expect_field_equals(response, MESSAGE_FIELD, expected, policy)
}

/// Assert that the raw body contains `needle`
pub fn expect_body_contains(response: &ApiResponse, needle: &str) -> Result<()> {
    if !response.body.contains(needle) {
        return Err(Error::TestAssertion(format!(
            "Response does not contain '{}'. Got: {}",
            needle,
            response.body_excerpt()
        )));
    }
    Ok(())
}

/// Assert that the body is a non-empty JSON array, returning its length
pub fn expect_non_empty_list(response: &ApiResponse) -> Result<usize> {
    match decode_json(response)? {
        Value::Array(items) if items.is_empty() => Err(Error::TestAssertion(
            "Expected a non-empty list, got []".to_string(),
        )),
        Value::Array(items) => Ok(items.len()),
        other => Err(Error::decoding(
            format!("expected a JSON array, got {}", json_kind(&other)),
            &response.body_excerpt(),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: StatusCode, body: &str) -> ApiResponse {
        ApiResponse::new(status, body)
    }

    #[test]
    fn test_status_mismatch_reports_observed_status_and_body() {
        let resp = response(StatusCode::BAD_REQUEST, r#"{"errors":{"Title":["required"]}}"#);
        assert!(expect_status(&resp, StatusCode::BAD_REQUEST).is_ok());

        let err = expect_status(&resp, StatusCode::CREATED).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("201 Created"));
        assert!(msg.contains("400 Bad Request"));
        assert!(msg.contains("required"));
    }

    #[test]
    fn test_decode_json_rejects_empty_and_malformed() {
        assert!(matches!(
            decode_json(&response(StatusCode::OK, "")),
            Err(Error::Decoding { .. })
        ));
        assert!(matches!(
            decode_json(&response(StatusCode::OK, "{not json")),
            Err(Error::Decoding { .. })
        ));
        assert!(decode_json(&response(StatusCode::OK, r#"{"a":1}"#)).is_ok());
    }

    #[test]
    fn test_non_empty_string_field() {
        let resp = response(StatusCode::CREATED, r#"{"storyId":"abc-123"}"#);
        let json = decode_json(&resp).unwrap();
        assert_eq!(expect_non_empty_string(&json, "storyId", &resp).unwrap(), "abc-123");

        let resp = response(StatusCode::CREATED, r#"{"storyId":"","other":1}"#);
        let json = decode_json(&resp).unwrap();
        assert!(expect_non_empty_string(&json, "storyId", &resp).is_err());
        assert!(expect_non_empty_string(&json, "missing", &resp).is_err());
        assert!(expect_non_empty_string(&json, "other", &resp).is_err());
    }

    #[test]
    fn test_message_required() {
        let ok = response(StatusCode::OK, r#"{"msg":"Successfully edited"}"#);
        assert!(expect_message(&ok, "Successfully edited", BodyPolicy::Required).unwrap());

        let wrong = response(StatusCode::OK, r#"{"msg":"Something else"}"#);
        let err = expect_message(&wrong, "Successfully edited", BodyPolicy::Required).unwrap_err();
        assert!(err.to_string().contains("Something else"));

        let empty = response(StatusCode::OK, "");
        assert!(expect_message(&empty, "Successfully edited", BodyPolicy::Required).is_err());
    }

    #[test]
    fn test_message_if_present_skips_empty_body() {
        let empty = response(StatusCode::NOT_FOUND, "   ");
        assert!(!expect_message(&empty, "No spoilers...", BodyPolicy::IfPresent).unwrap());

        let present = response(StatusCode::NOT_FOUND, r#"{"msg":"No spoilers..."}"#);
        assert!(expect_message(&present, "No spoilers...", BodyPolicy::IfPresent).unwrap());
    }

    #[test]
    fn test_message_if_present_checks_present_body() {
        let wrong = response(StatusCode::NOT_FOUND, r#"{"msg":"other"}"#);
        let err = expect_message(&wrong, "No spoilers...", BodyPolicy::IfPresent).unwrap_err();
        assert!(matches!(err, Error::TestAssertion(_)));
        assert!(err.to_string().contains("other"));

        let missing = response(StatusCode::BAD_REQUEST, r#"{"error":"x"}"#);
        assert!(expect_message(
            &missing,
            "Unable to delete this story spoiler!",
            BodyPolicy::IfPresent
        )
        .is_err());
    }

    #[test]
    fn test_message_if_present_still_fails_on_malformed_body() {
        let malformed = response(StatusCode::BAD_REQUEST, "Bad Request");
        assert!(matches!(
            expect_message(&malformed, "x", BodyPolicy::IfPresent),
            Err(Error::Decoding { .. })
        ));
    }

    #[test]
    fn test_body_contains() {
        let resp = response(StatusCode::OK, r#"{"msg":"Deleted successfully!"}"#);
        assert!(expect_body_contains(&resp, "Deleted successfully!").is_ok());
        assert!(expect_body_contains(&resp, "Nope").is_err());
    }

    #[test]
    fn test_non_empty_list() {
        let resp = response(StatusCode::OK, r#"[{"id":"1"},{"id":"2"}]"#);
        assert_eq!(expect_non_empty_list(&resp).unwrap(), 2);

        assert!(matches!(
            expect_non_empty_list(&response(StatusCode::OK, "[]")),
            Err(Error::TestAssertion(_))
        ));
        assert!(matches!(
            expect_non_empty_list(&response(StatusCode::OK, r#"{"items":[]}"#)),
            Err(Error::Decoding { .. })
        ));
    }
}
