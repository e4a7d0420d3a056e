//! Post-login return targets.

/// Accept a `redirect` parameter only if it is a same-site absolute path.
///
/// Anything else (missing, blank, `//host`, `https://…`, backslash tricks)
/// falls back to `default`.
pub fn safe_redirect_target(param: Option<&str>, default: &str) -> String {
    match param.map(str::trim) {
        Some(target)
            if target.starts_with('/')
                && !target.starts_with("//")
                && !target.contains('\\')
                && !target.chars().any(char::is_control) =>
        {
            target.to_string()
        }
        Some(rejected) if !rejected.is_empty() => {
            tracing::debug!(target = rejected, "ignoring off-site redirect target");
            default.to_string()
        }
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_local_paths() {
        assert_eq!(safe_redirect_target(Some("/admin/bookings"), "/account"), "/admin/bookings");
        assert_eq!(
            safe_redirect_target(Some("/checkout?date=2026-05-01"), "/account"),
            "/checkout?date=2026-05-01"
        );
    }

    #[test]
    fn rejects_other_origins() {
        for bad in ["https://evil.test", "//evil.test", "/\\evil.test", "javascript:alert(1)", ""] {
            assert_eq!(safe_redirect_target(Some(bad), "/account"), "/account", "{bad}");
        }
        assert_eq!(safe_redirect_target(None, "/account"), "/account");
    }
}
