//! Admin console calls. The backend enforces the sysop role on every path;
//! a non-admin token gets 403.

use detailing_auth::SessionToken;
use detailing_core::model::{
    Blackout, BlackoutInput, Booking, CustomerProfile, CustomerSummary, DetailingService,
    ScheduleDay, ScheduleDayInput, ServiceInput, ServiceRecord, ServiceRecordInput, StatusUpdate,
    Vehicle, Weekday,
};
use detailing_core::{BlackoutId, BookingId, CustomerId, ServiceId};

use crate::endpoints::query_string;
use crate::{ApiClient, ApiError, CallOptions, Reply};

fn authed(options: CallOptions, token: &SessionToken) -> CallOptions {
    options.token(Some(token))
}

// Bookings

pub async fn bookings(client: &ApiClient, token: &SessionToken) -> Result<Vec<Booking>, ApiError> {
    client.fetch("/admin/bookings", authed(CallOptions::get(), token)).await
}

pub async fn booking(client: &ApiClient, token: &SessionToken, id: BookingId) -> Result<Booking, ApiError> {
    client
        .fetch(&format!("/admin/bookings/{id}"), authed(CallOptions::get(), token))
        .await
}

/// Request a status change. The backend may answer with the updated booking
/// or with 204.
pub async fn update_booking_status(
    client: &ApiClient,
    token: &SessionToken,
    id: BookingId,
    update: &StatusUpdate,
) -> Result<Reply<Booking>, ApiError> {
    client
        .call(
            &format!("/admin/bookings/{id}/status"),
            authed(CallOptions::post(), token).json(update)?,
        )
        .await
}

// Customers

pub async fn customers(client: &ApiClient, token: &SessionToken) -> Result<Vec<CustomerSummary>, ApiError> {
    client.fetch("/admin/customers", authed(CallOptions::get(), token)).await
}

pub async fn customer(client: &ApiClient, token: &SessionToken, id: CustomerId) -> Result<CustomerProfile, ApiError> {
    client
        .fetch(&format!("/admin/customers/{id}"), authed(CallOptions::get(), token))
        .await
}

pub async fn customer_bookings(
    client: &ApiClient,
    token: &SessionToken,
    id: CustomerId,
) -> Result<Vec<Booking>, ApiError> {
    client
        .fetch(
            &format!("/admin/customers/{id}/bookings"),
            authed(CallOptions::get(), token),
        )
        .await
}

pub async fn customer_vehicles(
    client: &ApiClient,
    token: &SessionToken,
    id: CustomerId,
) -> Result<Vec<Vehicle>, ApiError> {
    client
        .fetch(
            &format!("/admin/customers/{id}/vehicles"),
            authed(CallOptions::get(), token),
        )
        .await
}

// Services

/// Every service, inactive ones included.
pub async fn services(client: &ApiClient, token: &SessionToken) -> Result<Vec<DetailingService>, ApiError> {
    client.fetch("/admin/services", authed(CallOptions::get(), token)).await
}

pub async fn create_service(
    client: &ApiClient,
    token: &SessionToken,
    input: &ServiceInput,
) -> Result<DetailingService, ApiError> {
    client
        .fetch("/admin/services", authed(CallOptions::post(), token).json(input)?)
        .await
}

pub async fn update_service(
    client: &ApiClient,
    token: &SessionToken,
    id: ServiceId,
    input: &ServiceInput,
) -> Result<DetailingService, ApiError> {
    client
        .fetch(
            &format!("/admin/services/{id}"),
            authed(CallOptions::put(), token).json(input)?,
        )
        .await
}

pub async fn delete_service(client: &ApiClient, token: &SessionToken, id: ServiceId) -> Result<(), ApiError> {
    client
        .send(&format!("/admin/services/{id}"), authed(CallOptions::delete(), token))
        .await
}

// Schedule

pub async fn schedule(client: &ApiClient, token: &SessionToken) -> Result<Vec<ScheduleDay>, ApiError> {
    client.fetch("/admin/schedule", authed(CallOptions::get(), token)).await
}

pub async fn save_schedule_day(
    client: &ApiClient,
    token: &SessionToken,
    weekday: Weekday,
    input: &ScheduleDayInput,
) -> Result<ScheduleDay, ApiError> {
    client
        .fetch(
            &format!("/admin/schedule/{}", weekday.number()),
            authed(CallOptions::put(), token).json(input)?,
        )
        .await
}

pub async fn blackouts(client: &ApiClient, token: &SessionToken) -> Result<Vec<Blackout>, ApiError> {
    client.fetch("/admin/blackouts", authed(CallOptions::get(), token)).await
}

pub async fn create_blackout(
    client: &ApiClient,
    token: &SessionToken,
    input: &BlackoutInput,
) -> Result<Blackout, ApiError> {
    client
        .fetch("/admin/blackouts", authed(CallOptions::post(), token).json(input)?)
        .await
}

pub async fn delete_blackout(client: &ApiClient, token: &SessionToken, id: BlackoutId) -> Result<(), ApiError> {
    client
        .send(&format!("/admin/blackouts/{id}"), authed(CallOptions::delete(), token))
        .await
}

// Service records

/// Narrow `/admin/service-records` to one booking or customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceRecordFilter {
    pub booking_id: Option<BookingId>,
    pub customer_id: Option<CustomerId>,
}

pub async fn service_records(
    client: &ApiClient,
    token: &SessionToken,
    filter: ServiceRecordFilter,
) -> Result<Vec<ServiceRecord>, ApiError> {
    let query = query_string([
        ("bookingId", filter.booking_id.map(|id| id.to_string())),
        ("customerId", filter.customer_id.map(|id| id.to_string())),
    ]);
    client
        .fetch(
            &format!("/admin/service-records{query}"),
            authed(CallOptions::get(), token),
        )
        .await
}

pub async fn create_service_record(
    client: &ApiClient,
    token: &SessionToken,
    input: &ServiceRecordInput,
) -> Result<ServiceRecord, ApiError> {
    client
        .fetch(
            "/admin/service-records",
            authed(CallOptions::post(), token).json(input)?,
        )
        .await
}
