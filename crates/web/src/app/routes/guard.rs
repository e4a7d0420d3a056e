//! Page-level authorization.
//!
//! A protected page either renders a complete view or redirects; it never
//! renders half a view. Any failed backend call while loading sends the
//! visitor to login, because the usual cause is an expired or revoked
//! session the optimistic gate let through. That redirect also expires the
//! session cookie; otherwise the gate would bounce the visitor from the
//! login page straight back to the failing page.

use std::fmt::Display;

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use detailing_auth::{AccessPolicy, SESSION_COOKIE, SessionToken, require_sysop};
use detailing_client::endpoints::{account, auth};
use detailing_client::ApiClient;
use detailing_core::model::{CustomerProfile, User};

use crate::app::errors::{ActionError, ResultExt, WebError};
use crate::context::SessionContext;
use crate::session;

/// A page that will not render; the browser goes elsewhere (303).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRedirect {
    location: String,
    expire_session: bool,
}

impl PageRedirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            expire_session: false,
        }
    }

    /// Login, returning to `path` afterwards.
    pub fn login(policy: &AccessPolicy, path: &str) -> Self {
        Self::to(policy.login_redirect(path))
    }

    /// Also drop the `session_token` cookie with this redirect.
    pub fn expiring_session(mut self) -> Self {
        self.expire_session = true;
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn expires_session(&self) -> bool {
        self.expire_session
    }
}

impl IntoResponse for PageRedirect {
    fn into_response(self) -> Response {
        let redirect = Redirect::to(&self.location);
        if self.expire_session {
            let jar = CookieJar::new().add(session::removal(SESSION_COOKIE));
            (jar, redirect).into_response()
        } else {
            redirect.into_response()
        }
    }
}

/// The session token, or a login redirect when there is none.
pub fn require_token<'a>(
    ctx: &'a SessionContext,
    policy: &AccessPolicy,
    path: &str,
) -> Result<&'a SessionToken, PageRedirect> {
    ctx.token().ok_or_else(|| PageRedirect::login(policy, path))
}

/// Map a failed page load to a login redirect that drops the session cookie.
pub fn to_login<E: Display>(policy: &AccessPolicy, path: &str) -> impl FnOnce(E) -> PageRedirect {
    let policy = policy.clone();
    let path = path.to_string();
    move |err| {
        tracing::info!(%path, error = %err, "page load failed; redirecting to login");
        PageRedirect::login(&policy, &path).expiring_session()
    }
}

/// Load the signed-in user and profile together and require the sysop flag.
///
/// Either call failing sends the visitor to login; a customer account goes
/// to `/account`.
pub async fn require_admin(
    api: &ApiClient,
    policy: &AccessPolicy,
    token: &SessionToken,
    path: &str,
) -> Result<(User, CustomerProfile), PageRedirect> {
    let (user, profile) = tokio::try_join!(auth::me(api, token), account::profile(api, token))
        .map_err(to_login(policy, path))?;

    if let Err(err) = require_sysop(&user) {
        tracing::info!(%path, error = %err, "non-admin sent to account page");
        return Err(PageRedirect::to(policy.landing_path.clone()));
    }
    Ok((user, profile))
}

/// Token for an action; actions answer 401 instead of redirecting.
pub fn require_session(ctx: &SessionContext) -> Result<&SessionToken, ActionError> {
    ctx.token()
        .ok_or(WebError::Unauthenticated)
        .or_say("Please sign in")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{StatusCode, header::{LOCATION, SET_COOKIE}};

    #[test]
    fn login_redirect_keeps_return_path() {
        let redirect = PageRedirect::login(&AccessPolicy::default(), "/admin/customers");
        assert_eq!(redirect.location(), "/login?redirect=%2Fadmin%2Fcustomers");
    }

    #[test]
    fn page_redirect_is_see_other() {
        let resp = PageRedirect::to("/cart").into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), "/cart");
    }

    #[test]
    fn missing_token_on_a_page_is_a_login_redirect() {
        let ctx = SessionContext::default();
        let err = require_token(&ctx, &AccessPolicy::default(), "/account").unwrap_err();
        assert_eq!(err.location(), "/login?redirect=%2Faccount");
        assert!(!err.expires_session());
        assert!(require_session(&ctx).is_err());
    }

    #[test]
    fn failed_load_expires_the_session_cookie() {
        let redirect = to_login(&AccessPolicy::default(), "/account")("401 Unauthorized");
        assert_eq!(redirect.location(), "/login?redirect=%2Faccount");
        assert!(redirect.expires_session());

        let resp = redirect.into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let cookie = resp.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("session_token=;"), "{cookie}");
        assert!(cookie.contains("Max-Age=0"), "{cookie}");
    }

    #[test]
    fn plain_redirect_sets_no_cookie() {
        let resp = PageRedirect::to("/cart").into_response();
        assert!(resp.headers().get(SET_COOKIE).is_none());
    }
}
