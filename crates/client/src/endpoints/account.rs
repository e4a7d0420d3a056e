use detailing_auth::SessionToken;
use detailing_core::model::{Booking, CustomerProfile, ProfileInput, Vehicle, VehicleInput};
use detailing_core::{BookingId, VehicleId};

use crate::{ApiClient, ApiError, CallOptions};

pub async fn profile(client: &ApiClient, token: &SessionToken) -> Result<CustomerProfile, ApiError> {
    client.fetch("/me/profile", CallOptions::get().token(Some(token))).await
}

pub async fn update_profile(
    client: &ApiClient,
    token: &SessionToken,
    input: &ProfileInput,
) -> Result<CustomerProfile, ApiError> {
    client
        .fetch("/me/profile", CallOptions::put().token(Some(token)).json(input)?)
        .await
}

pub async fn vehicles(client: &ApiClient, token: &SessionToken) -> Result<Vec<Vehicle>, ApiError> {
    client.fetch("/me/vehicles", CallOptions::get().token(Some(token))).await
}

pub async fn create_vehicle(
    client: &ApiClient,
    token: &SessionToken,
    input: &VehicleInput,
) -> Result<Vehicle, ApiError> {
    client
        .fetch("/me/vehicles", CallOptions::post().token(Some(token)).json(input)?)
        .await
}

pub async fn update_vehicle(
    client: &ApiClient,
    token: &SessionToken,
    id: VehicleId,
    input: &VehicleInput,
) -> Result<Vehicle, ApiError> {
    client
        .fetch(
            &format!("/me/vehicles/{id}"),
            CallOptions::put().token(Some(token)).json(input)?,
        )
        .await
}

pub async fn delete_vehicle(client: &ApiClient, token: &SessionToken, id: VehicleId) -> Result<(), ApiError> {
    client
        .send(&format!("/me/vehicles/{id}"), CallOptions::delete().token(Some(token)))
        .await
}

pub async fn bookings(client: &ApiClient, token: &SessionToken) -> Result<Vec<Booking>, ApiError> {
    client.fetch("/me/bookings", CallOptions::get().token(Some(token))).await
}

pub async fn booking(client: &ApiClient, token: &SessionToken, id: BookingId) -> Result<Booking, ApiError> {
    client
        .fetch(&format!("/me/bookings/{id}"), CallOptions::get().token(Some(token)))
        .await
}
