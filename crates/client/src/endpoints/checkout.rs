use chrono::NaiveDate;

use detailing_auth::SessionToken;
use detailing_core::model::{AvailableSlot, Booking, CheckoutRequest, DepositQuote, DepositRequest};

use crate::endpoints::query_string;
use crate::{ApiClient, ApiError, CallOptions};

/// Open start times for `date`, computed by the backend.
pub async fn available_slots(
    client: &ApiClient,
    token: &SessionToken,
    date: NaiveDate,
) -> Result<Vec<AvailableSlot>, ApiError> {
    let query = query_string([("date", Some(date.format("%Y-%m-%d").to_string()))]);
    client
        .fetch(
            &format!("/checkout/available-slots{query}"),
            CallOptions::get().token(Some(token)),
        )
        .await
}

/// Deposit owed for the current cart.
pub async fn deposit(client: &ApiClient, token: &SessionToken, req: &DepositRequest) -> Result<DepositQuote, ApiError> {
    client
        .fetch("/checkout/deposit", CallOptions::post().token(Some(token)).json(req)?)
        .await
}

/// Turn the cart into a booking.
pub async fn submit(
    client: &ApiClient,
    token: &SessionToken,
    cart_session: Option<&str>,
    req: &CheckoutRequest,
) -> Result<Booking, ApiError> {
    client
        .fetch(
            "/checkout",
            CallOptions::post()
                .token(Some(token))
                .cart_session(cart_session)
                .json(req)?,
        )
        .await
}
