//! `detailing-client` — the one way to talk to the detailing backend.
//!
//! [`ApiClient::call`] builds every request (JSON content type, bearer token,
//! cart-session header) and turns every non-2xx answer into an [`ApiError`].
//! Typed bindings for each backend path live in [`endpoints`]; stateful form
//! widgets that reconcile local lists after a mutation live in [`widgets`].

pub mod endpoints;
pub mod error;
pub mod gateway;
pub mod widgets;

pub use error::{normalize_error, ApiError, ClientBuildError};
pub use gateway::{ApiClient, CallOptions, Reply};
