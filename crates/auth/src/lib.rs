//! `detailing-auth` — session and access rules, decoupled from HTTP.
//!
//! Nothing in this crate verifies a token. The session cookie is only a hint
//! that lets the web layer skip a round trip; the backend decides on every
//! call whether the token is good.

pub mod access;
pub mod authorize;
pub mod redirect;
pub mod session;

pub use access::{AccessDecision, AccessPolicy};
pub use authorize::{require_sysop, AuthzError, Role};
pub use redirect::safe_redirect_target;
pub use session::{
    CART_SESSION_COOKIE, CART_SESSION_HEADER, SESSION_COOKIE, SESSION_MAX_AGE_DAYS, SessionToken,
};
