use axum::http::StatusCode;
use axum::response::Redirect;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// The catalogue is the landing page.
pub async fn home() -> Redirect {
    Redirect::to("/catalogue")
}
