//! Cookies this server sets.

use axum_extra::extract::cookie::{Cookie, SameSite};

use detailing_auth::{CART_SESSION_COOKIE, SESSION_COOKIE, SESSION_MAX_AGE_DAYS};

/// `session_token`: HTTP-only, `SameSite=Lax`, path `/`, 30 days.
pub fn session_cookie(token: &str, secure: bool) -> Cookie<'static> {
    long_lived(SESSION_COOKIE, token.to_string(), secure)
}

/// Anonymous cart id, same attributes as the session cookie.
pub fn cart_session_cookie(id: &str, secure: bool) -> Cookie<'static> {
    long_lived(CART_SESSION_COOKIE, id.to_string(), secure)
}

/// Expired, empty cookie that makes the browser drop `name`.
pub fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build()
}

fn long_lived(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::days(SESSION_MAX_AGE_DAYS))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("tok_1", false);
        assert_eq!(cookie.name(), "session_token");
        assert_eq!(cookie.value(), "tok_1");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(30)));
        assert!(cookie.secure().is_none_or(|s| !s));

        let rendered = cookie.to_string();
        assert!(rendered.contains("Max-Age=2592000"), "{rendered}");
    }

    #[test]
    fn removal_expires_immediately_on_same_path() {
        let cookie = removal(SESSION_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn production_cookie_is_secure() {
        assert_eq!(session_cookie("tok_1", true).secure(), Some(true));
    }
}
