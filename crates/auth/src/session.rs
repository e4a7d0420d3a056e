//! Session credential and the cookie contract around it.

/// Cookie holding the bearer token.
pub const SESSION_COOKIE: &str = "session_token";

/// Session cookie lifetime.
pub const SESSION_MAX_AGE_DAYS: i64 = 30;

/// Cookie holding the anonymous cart-session id.
pub const CART_SESSION_COOKIE: &str = "cart_session";

/// Header the backend reads the cart-session id from.
pub const CART_SESSION_HEADER: &str = "X-Cart-Session";

/// Opaque bearer credential issued by the backend at login.
///
/// Never decoded here. `Debug` is redacted so the value cannot leak into
/// logs through `?token` fields.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Blank values are treated as no token at all.
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl core::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}
