//! Error contract of the gateway.
//!
//! The backend answers failures in two shapes: problem documents
//! (`{"status", "title", "detail", "errors"}`) and gateway errors
//! (`{"message"}`). Both, and anything unreadable, end up as one [`ApiError`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Status used when no HTTP response was received at all.
pub const TRANSPORT_STATUS: u16 = 0;

/// Normalized failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{title} ({status}): {detail}")]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// HTTP status of the response, or [`TRANSPORT_STATUS`].
    pub status: u16,
    pub title: String,
    /// Human-readable explanation, safe to show to the user.
    pub detail: String,
    /// Per-field messages for form errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiError {
    pub fn new(status: u16, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status,
            title: title.into(),
            detail: detail.into(),
            errors: None,
        }
    }

    /// No usable body: status text stands in for the detail.
    pub fn fallback(status: u16, status_text: &str) -> Self {
        Self::new(status, "Error", status_text)
    }

    pub(crate) fn transport(path: &str, err: &reqwest::Error) -> Self {
        Self::new(TRANSPORT_STATUS, "Network Error", format!("{path}: {err}"))
    }

    pub(crate) fn decode(status: u16, path: &str, err: &serde_json::Error) -> Self {
        Self::new(status, "Error", format!("unexpected response body from {path}: {err}"))
    }

    pub(crate) fn encode(path: &str, err: &serde_json::Error) -> Self {
        Self::new(TRANSPORT_STATUS, "Request Error", format!("could not encode body for {path}: {err}"))
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// 401 or 403: the backend does not accept this session for this call.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    pub fn is_transport(&self) -> bool {
        self.status == TRANSPORT_STATUS
    }

    /// Message for the UI: the backend's detail, or the call site's fallback
    /// when there is nothing presentable.
    pub fn user_message(&self, fallback: &str) -> String {
        if self.is_transport() || self.detail.trim().is_empty() {
            fallback.to_string()
        } else {
            self.detail.clone()
        }
    }

    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Turn a non-2xx response into an [`ApiError`].
///
/// Precedence for `detail`: non-empty `detail`, then non-empty `message`, then
/// `status_text`. A body that is not a JSON object is treated as unreadable.
pub fn normalize_error(status: u16, status_text: &str, body: &[u8]) -> ApiError {
    let object = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => object,
        _ => return ApiError::fallback(status, status_text),
    };

    let detail = non_empty_str(&object, "detail")
        .or_else(|| non_empty_str(&object, "message"))
        .unwrap_or(status_text);
    let title = non_empty_str(&object, "title").unwrap_or("Error");

    ApiError {
        status,
        title: title.to_string(),
        detail: detail.to_string(),
        errors: object.get("errors").and_then(field_errors),
    }
}

fn non_empty_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// `{"field": ["msg", ...]}`; a bare string counts as one message.
fn field_errors(value: &Value) -> Option<BTreeMap<String, Vec<String>>> {
    let object = value.as_object()?;
    let mut out = BTreeMap::new();
    for (field, messages) in object {
        let messages: Vec<String> = match messages {
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => continue,
        };
        if !messages.is_empty() {
            out.insert(field.clone(), messages);
        }
    }
    (!out.is_empty()).then_some(out)
}

/// Failure to construct an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn body(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn problem_document_is_passed_through() {
        let err = normalize_error(
            422,
            "Unprocessable Entity",
            &body(json!({
                "status": 422,
                "title": "Validation Failed",
                "detail": "Vehicle year is out of range",
                "errors": { "year": ["must be 1950 or later"] }
            })),
        );
        assert_eq!(err.status, 422);
        assert_eq!(err.title, "Validation Failed");
        assert_eq!(err.detail, "Vehicle year is out of range");
        assert_eq!(err.field_errors("year"), ["must be 1950 or later"]);
    }

    #[test]
    fn gateway_message_fills_detail() {
        let err = normalize_error(502, "Bad Gateway", &body(json!({ "message": "upstream timed out" })));
        assert_eq!(err.detail, "upstream timed out");
        assert_eq!(err.title, "Error");
        assert!(err.errors.is_none());
    }

    #[test]
    fn detail_wins_over_message() {
        let err = normalize_error(400, "Bad Request", &body(json!({ "detail": "d", "message": "m" })));
        assert_eq!(err.detail, "d");
    }

    #[test]
    fn empty_detail_falls_through_to_message_then_status_text() {
        let err = normalize_error(400, "Bad Request", &body(json!({ "detail": "", "message": "m" })));
        assert_eq!(err.detail, "m");
        let err = normalize_error(400, "Bad Request", &body(json!({ "detail": "", "title": "" })));
        assert_eq!(err.detail, "Bad Request");
        assert_eq!(err.title, "Error");
    }

    #[test]
    fn non_object_json_is_unreadable() {
        let err = normalize_error(500, "Internal Server Error", b"[\"oops\"]");
        assert_eq!(err, ApiError::fallback(500, "Internal Server Error"));
    }

    #[test]
    fn malformed_errors_map_is_dropped_not_fatal() {
        let err = normalize_error(
            422,
            "Unprocessable Entity",
            &body(json!({ "detail": "bad", "errors": { "a": 1, "b": "one", "c": ["x", 2] } })),
        );
        let errors = err.errors.unwrap();
        assert_eq!(errors.get("b").unwrap(), &vec!["one".to_string()]);
        assert_eq!(errors.get("c").unwrap(), &vec!["x".to_string()]);
        assert!(!errors.contains_key("a"));
    }

    #[test]
    fn user_message_prefers_detail_except_for_transport() {
        let err = ApiError::new(409, "Conflict", "That slot was just taken");
        assert_eq!(err.user_message("Could not book"), "That slot was just taken");
        let err = ApiError::new(TRANSPORT_STATUS, "Network Error", "connection refused");
        assert_eq!(err.user_message("Could not book"), "Could not book");
    }

    proptest! {
        /// Property: a non-empty `detail` is reproduced exactly.
        #[test]
        fn detail_is_exact(status in 400u16..600, detail in ".+", message in ".*") {
            let raw = body(json!({ "detail": detail.clone(), "message": message }));
            let err = normalize_error(status, "Status Text", &raw);
            prop_assert_eq!(err.status, status);
            prop_assert_eq!(err.detail, detail);
        }

        /// Property: without `detail`, a non-empty `message` becomes the detail.
        #[test]
        fn message_is_used_without_detail(status in 400u16..600, message in ".+") {
            let raw = body(json!({ "message": message.clone() }));
            let err = normalize_error(status, "Status Text", &raw);
            prop_assert_eq!(err.detail, message);
        }

        /// Property: a body that is not JSON yields status text and status code.
        #[test]
        fn unparseable_body_uses_status_text(
            status in 400u16..600,
            text in "[A-Za-z ]{0,24}",
            raw in "[^\\[{\"0-9tfn \\t\\r\\n-][^\\x00]{0,40}",
        ) {
            let err = normalize_error(status, &text, raw.as_bytes());
            prop_assert_eq!(err.status, status);
            prop_assert_eq!(err.detail, text);
            prop_assert_eq!(err.title, "Error");
        }
    }
}
