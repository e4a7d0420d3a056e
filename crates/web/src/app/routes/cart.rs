use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use axum_extra::extract::cookie::CookieJar;

use detailing_client::widgets::CartWidget;
use detailing_core::CartItemId;
use detailing_core::model::{CartItemRequest, CartQuantityRequest};

use crate::app::errors::{ActionError, ResultExt};
use crate::app::services::AppServices;
use crate::app::views::CartView;
use crate::context::SessionContext;
use crate::session;

pub fn router() -> Router {
    Router::new()
        .route("/cart", get(cart_page))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:id", patch(update_item).delete(remove_item))
}

fn widget(services: &AppServices, ctx: &SessionContext) -> CartWidget {
    CartWidget::new(
        services.api.clone(),
        ctx.token().cloned(),
        ctx.cart_session().map(str::to_string),
    )
}

/// The cart view, plus a `cart_session` cookie when the backend issued a new id.
fn cart_response(services: &AppServices, ctx: &SessionContext, widget: &CartWidget) -> Response {
    let view = Json(CartView::of(widget.cart()));
    match widget.cart_session() {
        Some(id) if ctx.cart_session() != Some(id) => {
            let jar = CookieJar::new().add(session::cart_session_cookie(id, services.secure_cookies()));
            (jar, view).into_response()
        }
        _ => view.into_response(),
    }
}

/// No cart yet (404) renders as an empty cart.
pub async fn cart_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Json<CartView>, ActionError> {
    let mut widget = widget(&services, &ctx);
    let cart = widget.load().await.or_say("Could not load your cart")?;
    Ok(Json(CartView::of(cart)))
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(req): Json<CartItemRequest>,
) -> Result<Response, ActionError> {
    let mut widget = widget(&services, &ctx);
    widget.add(&req).await.or_say("Could not add this service to your cart")?;
    Ok(cart_response(&services, &ctx, &widget))
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(req): Json<CartQuantityRequest>,
) -> Result<Response, ActionError> {
    let id = id.parse::<CartItemId>().or_say("Unknown cart item")?;
    let mut widget = widget(&services, &ctx);
    widget
        .set_quantity(id, req.quantity)
        .await
        .or_say("Could not update your cart")?;
    reload_if_unknown(&mut widget).await?;
    Ok(cart_response(&services, &ctx, &widget))
}

pub async fn remove_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Response, ActionError> {
    let id = id.parse::<CartItemId>().or_say("Unknown cart item")?;
    let mut widget = widget(&services, &ctx);
    widget.remove(id).await.or_say("Could not update your cart")?;
    reload_if_unknown(&mut widget).await?;
    Ok(cart_response(&services, &ctx, &widget))
}

/// A 204 leaves a fresh widget with nothing to patch; fetch the result.
async fn reload_if_unknown(widget: &mut CartWidget) -> Result<(), ActionError> {
    if widget.cart().is_none() {
        widget.load().await.or_say("Could not load your cart")?;
    }
    Ok(())
}
