use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Extension, OriginalUri, Query},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;

use detailing_auth::CART_SESSION_COOKIE;
use detailing_client::endpoints::{account, cart, checkout};
use detailing_core::format::{format_naive_date, parse_date, parse_time};
use detailing_core::model::{CheckoutRequest, DepositRequest};
use detailing_core::{DomainError, FieldErrors, VehicleId};

use crate::app::errors::{ActionError, ResultExt};
use crate::app::routes::guard::{PageRedirect, require_session, require_token, to_login};
use crate::app::services::AppServices;
use crate::app::views::{CartView, CheckoutView, DepositView, SlotView, VehicleView};
use crate::context::SessionContext;
use crate::session;

pub fn router() -> Router {
    Router::new().route("/checkout", get(checkout_page).post(submit))
}

#[derive(Debug, Deserialize)]
pub struct CheckoutQuery {
    #[serde(default)]
    pub date: Option<String>,
}

/// Cart, slots for the chosen date, deposit quote and vehicles, loaded
/// together. An empty cart goes back to `/cart`; any other failure to login.
pub async fn checkout_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<CheckoutQuery>,
) -> Result<Json<CheckoutView>, PageRedirect> {
    let path = uri.path_and_query().map_or(uri.path(), |pq| pq.as_str());
    let policy = &services.policy;
    let token = require_token(&ctx, policy, path)?;

    let date = query
        .date
        .as_deref()
        .and_then(parse_date)
        .unwrap_or_else(|| Utc::now().date_naive());

    let api = &services.api;
    let deposit_req = DepositRequest { date: Some(date) };
    let (cart, slots, deposit, vehicles) = tokio::join!(
        cart::get(api, ctx.cart_owner()),
        checkout::available_slots(api, token, date),
        checkout::deposit(api, token, &deposit_req),
        account::vehicles(api, token),
    );

    let cart = match cart {
        Ok(cart) if !cart.is_empty() => cart,
        Ok(_) => return Err(PageRedirect::to("/cart")),
        Err(err) if err.is_not_found() => return Err(PageRedirect::to("/cart")),
        Err(err) => return Err(to_login(policy, path)(err)),
    };
    let slots = slots.map_err(to_login(policy, path))?;
    let deposit = deposit.map_err(to_login(policy, path))?;
    let vehicles = vehicles.map_err(to_login(policy, path))?;

    Ok(Json(CheckoutView {
        date: date.format("%Y-%m-%d").to_string(),
        date_label: format_naive_date(date),
        cart: CartView::of(Some(&cart)),
        slots: slots.iter().map(SlotView::from).collect(),
        deposit: DepositView::from(deposit),
        vehicles: vehicles.iter().map(VehicleView::from).collect(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[serde(default)]
    pub vehicle_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CheckoutForm {
    fn into_request(self) -> Result<CheckoutRequest, DomainError> {
        let mut errors = FieldErrors::new();
        let vehicle_id = self.vehicle_id.parse::<VehicleId>().ok();
        if vehicle_id.is_none() {
            errors.add("vehicleId", "Choose a vehicle");
        }
        let date = parse_date(&self.date);
        if date.is_none() {
            errors.add("date", "Choose a date");
        }
        if parse_time(&self.start_time).is_none() {
            errors.add("startTime", "Choose a time slot");
        }
        match (vehicle_id, date) {
            (Some(vehicle_id), Some(date)) if errors.is_empty() => Ok(CheckoutRequest {
                vehicle_id,
                date,
                start_time: self.start_time.trim().to_string(),
                notes: self
                    .notes
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty()),
            }),
            _ => Err(errors.into()),
        }
    }
}

/// Place the booking and show it.
pub async fn submit(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Form(form): Form<CheckoutForm>,
) -> Result<Response, ActionError> {
    let token = require_session(&ctx)?;
    let req = form.into_request().or_say("Please complete the booking form")?;

    let booking = checkout::submit(&services.api, token, ctx.cart_session(), &req)
        .await
        .or_say("Could not complete your booking")?;
    tracing::info!(booking_id = %booking.id, reference = %booking.reference, "booking placed");

    // The cart became the booking.
    let jar = CookieJar::new().add(session::removal(CART_SESSION_COOKIE));
    Ok((jar, Redirect::to(&format!("/account/bookings/{}", booking.id))).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_form_lists_every_missing_field() {
        let form = CheckoutForm {
            vehicle_id: String::new(),
            date: "tomorrow".into(),
            start_time: "9am".into(),
            notes: None,
        };
        let Err(DomainError::Validation(errors)) = form.into_request() else {
            panic!("expected validation errors");
        };
        assert!(!errors.get("vehicleId").is_empty());
        assert!(!errors.get("date").is_empty());
        assert!(!errors.get("startTime").is_empty());
    }

    #[test]
    fn blank_notes_are_dropped() {
        let form = CheckoutForm {
            vehicle_id: VehicleId::new().to_string(),
            date: "2026-11-03".into(),
            start_time: "09:30".into(),
            notes: Some("   ".into()),
        };
        let req = form.into_request().unwrap();
        assert_eq!(req.start_time, "09:30");
        assert!(req.notes.is_none());
    }
}
