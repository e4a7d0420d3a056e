//! Error responses.
//!
//! Every failure renders the same body the backend uses for problems:
//! `{"status", "title", "detail", "errors"?}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use detailing_client::widgets::WidgetError;
use detailing_client::ApiError;
use detailing_core::DomainError;

/// Failure of an action or public page.
#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// Protected action without a session cookie.
    #[error("not signed in")]
    Unauthenticated,

    #[error("not found")]
    NotFound,
}

impl From<WidgetError> for WebError {
    fn from(value: WidgetError) -> Self {
        match value {
            WidgetError::Invalid(err) => WebError::Invalid(err),
            WidgetError::Api(err) => WebError::Api(err),
        }
    }
}

/// A [`WebError`] plus the message shown when the error has nothing better.
#[derive(Debug)]
pub struct ActionError {
    pub error: WebError,
    pub fallback: &'static str,
}

impl ActionError {
    pub fn new(error: impl Into<WebError>, fallback: &'static str) -> Self {
        Self {
            error: error.into(),
            fallback,
        }
    }
}

pub trait ResultExt<T> {
    /// Attach the call site's user-facing fallback message.
    fn or_say(self, fallback: &'static str) -> Result<T, ActionError>;
}

impl<T, E: Into<WebError>> ResultExt<T> for Result<T, E> {
    fn or_say(self, fallback: &'static str) -> Result<T, ActionError> {
        self.map_err(|e| ActionError::new(e, fallback))
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let fallback = self.fallback;
        match self.error {
            WebError::Api(err) => api_error_response(&err, fallback),
            WebError::Invalid(DomainError::Validation(fields)) => {
                let mut err = ApiError::new(422, "Validation Failed", fallback);
                err.errors = Some(fields.into_map());
                api_error_response(&err, fallback)
            }
            WebError::Invalid(other) => json_error(StatusCode::BAD_REQUEST, "Bad Request", other.to_string()),
            WebError::Unauthenticated => json_error(StatusCode::UNAUTHORIZED, "Unauthorized", "Please sign in"),
            WebError::NotFound => json_error(StatusCode::NOT_FOUND, "Not Found", fallback),
        }
    }
}

pub fn json_error(status: StatusCode, title: &str, detail: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "status": status.as_u16(),
            "title": title,
            "detail": detail.into(),
        })),
    )
        .into_response()
}

/// Relay a backend failure to the browser.
///
/// The backend's status is kept when it is an error status; a transport
/// failure (or anything else unusable) becomes 502.
pub fn api_error_response(err: &ApiError, fallback: &str) -> Response {
    let status = StatusCode::from_u16(err.status)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY);

    if status.is_server_error() {
        tracing::warn!(status = err.status, detail = %err.detail, "backend call failed");
    }

    let mut body = json!({
        "status": status.as_u16(),
        "title": err.title,
        "detail": err.user_message(fallback),
    });
    if let Some(errors) = &err.errors {
        body["errors"] = json!(errors);
    }
    (status, axum::Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use detailing_core::FieldErrors;

    async fn body(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn transport_failure_is_bad_gateway_with_fallback() {
        let err = ApiError::new(0, "Network Error", "connection refused");
        let resp = api_error_response(&err, "Could not load your cart");
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body = body(resp).await;
        assert_eq!(body["detail"], "Could not load your cart");
        assert_eq!(body["status"], 502);
    }

    #[tokio::test]
    async fn backend_status_and_detail_are_kept() {
        let err = ApiError::new(409, "Conflict", "That slot was just taken");
        let resp = api_error_response(&err, "Could not book");
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(body(resp).await["detail"], "That slot was just taken");
    }

    #[tokio::test]
    async fn local_validation_is_422_with_fields() {
        let mut fields = FieldErrors::new();
        fields.add("email", "Enter a valid email address");
        let err: Result<(), DomainError> = Err(fields.into());
        let resp = err.or_say("Please check the form").unwrap_err().into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body(resp).await;
        assert_eq!(body["title"], "Validation Failed");
        assert_eq!(body["errors"]["email"][0], "Enter a valid email address");
    }
}
