use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use detailing_auth::{AccessDecision, AccessPolicy};

use crate::context::SessionContext;

#[derive(Debug, Clone)]
pub struct GateState {
    pub policy: Arc<AccessPolicy>,
}

/// Cookie-presence gate in front of every page and action.
///
/// Reads the session and cart cookies, redirects (307) when the policy says
/// so, and otherwise forwards with a [`SessionContext`] extension. It never
/// calls the backend.
///
/// Only page loads of `/login` and `/register` are bounced for a signed-in
/// visitor; a form post there is a fresh sign-in over a possibly stale
/// cookie and goes through.
pub async fn session_gate(
    State(state): State<GateState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let ctx = SessionContext::from_jar(&CookieJar::from_headers(req.headers()));
    let path = req.uri().path();

    if let AccessDecision::Redirect(location) = state.policy.decide(path, ctx.is_authenticated()) {
        let resubmitting = ctx.is_authenticated() && !matches!(*req.method(), Method::GET | Method::HEAD);
        if !resubmitting {
            tracing::debug!(path, %location, "session gate redirect");
            return Redirect::temporary(&location).into_response();
        }
    }

    req.extensions_mut().insert(ctx);
    next.run(req).await
}
