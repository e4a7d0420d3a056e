use detailing_auth::SessionToken;
use detailing_core::model::{AuthSession, LoginRequest, RegisterRequest, User};

use crate::{ApiClient, ApiError, CallOptions};

pub async fn login(client: &ApiClient, req: &LoginRequest) -> Result<AuthSession, ApiError> {
    client.fetch("/auth/login", CallOptions::post().json(req)?).await
}

pub async fn register(client: &ApiClient, req: &RegisterRequest) -> Result<AuthSession, ApiError> {
    client.fetch("/auth/register", CallOptions::post().json(req)?).await
}

/// Revoke the session server-side.
pub async fn logout(client: &ApiClient, token: &SessionToken) -> Result<(), ApiError> {
    client.send("/auth/logout", CallOptions::post().token(Some(token))).await
}

/// The user record behind `token`, including the `sysop` flag.
pub async fn me(client: &ApiClient, token: &SessionToken) -> Result<User, ApiError> {
    client.fetch("/me", CallOptions::get().token(Some(token))).await
}
