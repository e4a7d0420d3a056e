//! Route gating: a pure decision over (path, has-session).
//!
//! The gate is optimistic. A present cookie lets the request through; whether
//! the token is actually valid is settled by the first backend call the page
//! makes.

/// Outcome of the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Send the browser to this location instead.
    Redirect(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Paths (and everything below them) that need a session cookie.
    pub protected_prefixes: Vec<String>,
    /// Pages a signed-in visitor is bounced away from.
    pub auth_only_pages: Vec<String>,
    pub login_path: String,
    /// Where signed-in visitors land by default.
    pub landing_path: String,
    pub redirect_param: String,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            protected_prefixes: vec!["/account".into(), "/admin".into()],
            auth_only_pages: vec!["/login".into(), "/register".into()],
            login_path: "/login".into(),
            landing_path: "/account".into(),
            redirect_param: "redirect".into(),
        }
    }
}

impl AccessPolicy {
    pub fn decide(&self, path: &str, authenticated: bool) -> AccessDecision {
        if !authenticated && self.is_protected(path) {
            return AccessDecision::Redirect(self.login_redirect(path));
        }
        if authenticated && self.auth_only_pages.iter().any(|p| p == path) {
            return AccessDecision::Redirect(self.landing_path.clone());
        }
        AccessDecision::Allow
    }

    /// `/account` and `/account/...` are protected; `/accounts` is not.
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes.iter().any(|prefix| {
            path == prefix
                || path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// `/login?redirect=<path>` with the path percent-encoded.
    pub fn login_redirect(&self, original_path: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair(&self.redirect_param, original_path)
            .finish();
        format!("{}?{}", self.login_path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn policy() -> AccessPolicy {
        AccessPolicy::default()
    }

    #[test]
    fn anonymous_visitor_is_sent_to_login_with_return_path() {
        assert_eq!(
            policy().decide("/account", false),
            AccessDecision::Redirect("/login?redirect=%2Faccount".into())
        );
        assert_eq!(
            policy().decide("/admin/bookings/42", false),
            AccessDecision::Redirect("/login?redirect=%2Fadmin%2Fbookings%2F42".into())
        );
    }

    #[test]
    fn signed_in_visitor_skips_auth_pages() {
        assert_eq!(
            policy().decide("/login", true),
            AccessDecision::Redirect("/account".into())
        );
        assert_eq!(
            policy().decide("/register", true),
            AccessDecision::Redirect("/account".into())
        );
    }

    #[test]
    fn everything_else_passes() {
        assert_eq!(policy().decide("/", false), AccessDecision::Allow);
        assert_eq!(policy().decide("/catalogue", false), AccessDecision::Allow);
        assert_eq!(policy().decide("/login", false), AccessDecision::Allow);
        assert_eq!(policy().decide("/login/help", true), AccessDecision::Allow);
        assert_eq!(policy().decide("/accounts", false), AccessDecision::Allow);
        assert_eq!(policy().decide("/admin", true), AccessDecision::Allow);
    }

    proptest! {
        /// Property: any path under a protected prefix redirects an anonymous
        /// visitor to login, and the redirect parameter decodes back to the path.
        #[test]
        fn protected_subpaths_round_trip_through_redirect(
            prefix in prop::sample::select(vec!["/account", "/admin"]),
            rest in "(/[a-z0-9_-]{1,12}){0,4}",
        ) {
            let path = format!("{prefix}{rest}");
            let AccessDecision::Redirect(location) = policy().decide(&path, false) else {
                panic!("expected redirect for {path}");
            };
            let (base, query) = location.split_once('?').unwrap();
            prop_assert_eq!(base, "/login");
            let decoded: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect();
            prop_assert_eq!(decoded, vec![("redirect".to_string(), path.clone())]);

            prop_assert_eq!(policy().decide(&path, true), AccessDecision::Allow);
        }
    }
}
