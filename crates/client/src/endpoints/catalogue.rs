use detailing_core::model::DetailingService;

use crate::{ApiClient, ApiError, CallOptions};

/// Public service catalogue; no credentials needed.
pub async fn list(client: &ApiClient) -> Result<Vec<DetailingService>, ApiError> {
    client.fetch("/catalogue", CallOptions::get()).await
}

/// `slug` must already be a safe path segment (see [`is_valid_slug`]).
pub async fn by_slug(client: &ApiClient, slug: &str) -> Result<DetailingService, ApiError> {
    client.fetch(&format!("/catalogue/{slug}"), CallOptions::get()).await
}

/// Lowercase letters, digits and single dashes.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 120
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
