use axum_extra::extract::cookie::CookieJar;

use detailing_auth::{CART_SESSION_COOKIE, SESSION_COOKIE, SessionToken};
use detailing_client::endpoints::cart::CartOwner;

/// Credentials the browser sent with this request.
///
/// Inserted by the session gate for every routed request. Presence of a
/// token says nothing about its validity; the backend decides that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    token: Option<SessionToken>,
    cart_session: Option<String>,
}

impl SessionContext {
    pub fn new(token: Option<SessionToken>, cart_session: Option<String>) -> Self {
        Self { token, cart_session }
    }

    pub fn from_jar(jar: &CookieJar) -> Self {
        let token = jar
            .get(SESSION_COOKIE)
            .and_then(|c| SessionToken::from_cookie_value(c.value()));
        let cart_session = jar
            .get(CART_SESSION_COOKIE)
            .map(|c| c.value().trim().to_string())
            .filter(|v| !v.is_empty());
        Self::new(token, cart_session)
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn cart_session(&self) -> Option<&str> {
        self.cart_session.as_deref()
    }

    pub fn cart_owner(&self) -> CartOwner<'_> {
        CartOwner {
            token: self.token(),
            cart_session: self.cart_session(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header::COOKIE};

    fn jar(cookie: &'static str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(cookie));
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn reads_both_cookies() {
        let ctx = SessionContext::from_jar(&jar("session_token=tok_1; cart_session=cs_1"));
        assert_eq!(ctx.token().map(SessionToken::expose), Some("tok_1"));
        assert_eq!(ctx.cart_session(), Some("cs_1"));
    }

    #[test]
    fn empty_cookie_counts_as_absent() {
        let ctx = SessionContext::from_jar(&jar("session_token=; cart_session="));
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.cart_session(), None);
    }
}
