use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Extension, Query},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use detailing_auth::{SESSION_COOKIE, safe_redirect_target};
use detailing_client::endpoints::auth;
use detailing_core::model::{AuthSession, LoginRequest, RegisterRequest};
use detailing_core::validation::{validate_login, validate_registration};

use crate::app::errors::{ActionError, ResultExt};
use crate::app::services::AppServices;
use crate::app::views::AuthPageView;
use crate::context::SessionContext;
use crate::session;

pub fn router() -> Router {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/logout", post(logout))
}

#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    #[serde(default)]
    pub redirect: Option<String>,
}

pub async fn login_page(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<RedirectQuery>,
) -> Json<AuthPageView> {
    Json(auth_page(&services, query.redirect.as_deref()))
}

pub async fn register_page(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<RedirectQuery>,
) -> Json<AuthPageView> {
    Json(auth_page(&services, query.redirect.as_deref()))
}

fn auth_page(services: &AppServices, redirect: Option<&str>) -> AuthPageView {
    AuthPageView {
        redirect: safe_redirect_target(redirect, &services.policy.landing_path),
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub redirect: Option<String>,
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, ActionError> {
    let req = LoginRequest {
        email: form.email.trim().to_string(),
        password: form.password,
    };
    validate_login(&req).or_say("Please check your email and password")?;

    let session = auth::login(&services.api, &req)
        .await
        .or_say("Could not sign you in")?;
    Ok(signed_in(&services, session, form.redirect.as_deref()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, ActionError> {
    let req = RegisterRequest {
        email: form.email.trim().to_string(),
        password: form.password,
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        phone: form
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()),
    };
    validate_registration(&req, &form.confirm_password).or_say("Please check the highlighted fields")?;

    let session = auth::register(&services.api, &req)
        .await
        .or_say("Could not create your account")?;
    Ok(signed_in(&services, session, form.redirect.as_deref()))
}

fn signed_in(services: &AppServices, session: AuthSession, redirect: Option<&str>) -> Response {
    let target = safe_redirect_target(redirect, &services.policy.landing_path);
    tracing::info!(user_id = %session.user.id, "signed in");

    let jar = CookieJar::new().add(session::session_cookie(
        &session.session_token,
        services.secure_cookies(),
    ));
    (jar, Redirect::to(&target)).into_response()
}

/// Revoke server-side when possible; the cookie is cleared regardless.
pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
) -> Response {
    if let Some(token) = ctx.token() {
        if let Err(err) = auth::logout(&services.api, token).await {
            tracing::warn!(error = %err, "backend logout failed; clearing cookie anyway");
        }
    }
    let jar = CookieJar::new().add(session::removal(SESSION_COOKIE));
    (jar, Redirect::to("/")).into_response()
}
