//! Request construction and response normalization.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use detailing_auth::{CART_SESSION_HEADER, SessionToken};

use crate::error::{normalize_error, ApiError, ClientBuildError};

/// Successful outcome of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Content(T),
    /// 204: the call succeeded and there is no body.
    NoContent,
}

impl<T> Reply<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Reply::Content(value) => Some(value),
            Reply::NoContent => None,
        }
    }

    pub fn is_no_content(&self) -> bool {
        matches!(self, Reply::NoContent)
    }
}

/// Per-call options. Nothing here outlives the call.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    pub token: Option<SessionToken>,
    pub cart_session: Option<String>,
}

impl CallOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::with_method(Method::POST)
    }

    pub fn put() -> Self {
        Self::with_method(Method::PUT)
    }

    pub fn patch() -> Self {
        Self::with_method(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::with_method(Method::DELETE)
    }

    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::encode("request", &e))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn token(mut self, token: Option<&SessionToken>) -> Self {
        self.token = token.cloned();
        self
    }

    pub fn cart_session(mut self, cart_session: Option<&str>) -> Self {
        self.cart_session = cart_session.map(str::to_string);
        self
    }
}

/// Gateway to the backend JSON API.
///
/// Cheap to clone and safe to share between concurrent requests: it holds no
/// per-user state (no cookie jar, no cache). Credentials come in through
/// [`CallOptions`] on every call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientBuildError> {
        let parsed = url::Url::parse(base_url).map_err(|e| ClientBuildError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientBuildError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("detailing-web/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request.
    ///
    /// 2xx other than 204 decodes the body as `T`; 204 yields
    /// [`Reply::NoContent`]; everything else is an [`ApiError`].
    pub async fn call<T: DeserializeOwned>(&self, path: &str, options: CallOptions) -> Result<Reply<T>, ApiError> {
        match self.execute(path, options).await? {
            Completed::NoContent => Ok(Reply::NoContent),
            Completed::Body { status, bytes } => serde_json::from_slice(&bytes)
                .map(Reply::Content)
                .map_err(|e| ApiError::decode(status.as_u16(), path, &e)),
        }
    }

    /// Like [`call`](Self::call), for endpoints that always return a body.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str, options: CallOptions) -> Result<T, ApiError> {
        match self.call(path, options).await? {
            Reply::Content(value) => Ok(value),
            Reply::NoContent => Err(ApiError::new(
                StatusCode::NO_CONTENT.as_u16(),
                "Error",
                "No Content",
            )),
        }
    }

    /// Issue a request and ignore any success body.
    pub async fn send(&self, path: &str, options: CallOptions) -> Result<(), ApiError> {
        self.execute(path, options).await.map(|_| ())
    }

    async fn execute(&self, path: &str, options: CallOptions) -> Result<Completed, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let method = options.method;

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &options.token {
            request = request.bearer_auth(token.expose());
        }
        if let Some(cart_session) = &options.cart_session {
            request = request.header(CART_SESSION_HEADER, cart_session);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "backend unreachable");
            ApiError::transport(path, &e)
        })?;

        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "backend call");

        if status.is_success() {
            if status == StatusCode::NO_CONTENT {
                return Ok(Completed::NoContent);
            }
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ApiError::transport(path, &e))?
                .to_vec();
            return Ok(Completed::Body { status, bytes });
        }

        let status_text = status.canonical_reason().unwrap_or("");
        // An unreadable body is the same as an unparseable one.
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(_) => Vec::new(),
        };
        let err = normalize_error(status.as_u16(), status_text, &body);
        tracing::debug!(%method, path, status = err.status, detail = %err.detail, "backend rejected call");
        Err(err)
    }
}

enum Completed {
    NoContent,
    Body { status: StatusCode, bytes: Vec<u8> },
}
