use axum::{Router, routing::get};

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalogue;
pub mod checkout;
pub mod guard;
pub mod system;

/// Every route behind the session gate.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::home))
        .merge(catalogue::router())
        .merge(auth::router())
        .merge(cart::router())
        .merge(checkout::router())
        .merge(account::router())
        .merge(admin::router())
}
