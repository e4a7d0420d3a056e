//! HTTP application wiring.
//!
//! - `services.rs`: what handlers share (gateway client, config, access policy)
//! - `routes/`: page controllers and form actions, one file per area
//! - `views.rs`: JSON view models the pages render
//! - `errors.rs`: error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use detailing_auth::AccessPolicy;
use detailing_client::{ApiClient, ClientBuildError};

use crate::config::WebConfig;
use crate::middleware;

pub mod errors;
pub mod routes;
pub mod services;
pub mod views;

/// Build the full router (used by `main.rs` and the black-box tests).
pub fn build_app(config: WebConfig) -> Result<Router, ClientBuildError> {
    let api = ApiClient::new(&config.api_url)?;
    let policy = Arc::new(AccessPolicy::default());
    let services = Arc::new(services::AppServices::new(api, config, policy.clone()));

    let gated = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            middleware::GateState { policy },
            middleware::session_gate,
        ));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(gated)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
}
