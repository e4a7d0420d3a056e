use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, OriginalUri, Path},
    http::StatusCode,
    routing::{get, put},
};

use detailing_client::endpoints::{account, auth};
use detailing_client::widgets::VehicleManager;
use detailing_core::model::{CustomerProfile, ProfileInput, VehicleInput};
use detailing_core::query::{BookingSort, sort_bookings};
use detailing_core::validation::validate_profile;
use detailing_core::{BookingId, VehicleId};

use crate::app::errors::{ActionError, ResultExt};
use crate::app::routes::guard::{PageRedirect, require_session, require_token, to_login};
use crate::app::services::AppServices;
use crate::app::views::{
    AccountView, BookingDetailView, BookingRow, BookingsView, UserView, VehicleView, VehiclesView,
};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/account", get(account_page))
        .route("/account/profile", put(update_profile))
        .route("/account/bookings", get(bookings_page))
        .route("/account/bookings/:id", get(booking_page))
        .route("/account/vehicles", get(vehicles_page).post(create_vehicle))
        .route("/account/vehicles/:id", put(update_vehicle).delete(delete_vehicle))
}

// Pages

pub async fn account_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<AccountView>, PageRedirect> {
    let (api, policy, path) = (&services.api, &services.policy, uri.path());
    let token = require_token(&ctx, policy, path)?;

    let (user, profile, mut bookings, vehicles) = tokio::try_join!(
        auth::me(api, token),
        account::profile(api, token),
        account::bookings(api, token),
        account::vehicles(api, token),
    )
    .map_err(to_login(policy, path))?;

    sort_bookings(&mut bookings, BookingSort::DateDesc);
    Ok(Json(AccountView {
        user: UserView::from(&user),
        profile,
        bookings: bookings.iter().map(BookingRow::from).collect(),
        vehicles: vehicles.iter().map(VehicleView::from).collect(),
    }))
}

pub async fn bookings_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<BookingsView>, PageRedirect> {
    let (policy, path) = (&services.policy, uri.path());
    let token = require_token(&ctx, policy, path)?;

    let mut bookings = account::bookings(&services.api, token)
        .await
        .map_err(to_login(policy, path))?;
    sort_bookings(&mut bookings, BookingSort::DateDesc);

    Ok(Json(BookingsView {
        bookings: bookings.iter().map(BookingRow::from).collect(),
    }))
}

pub async fn booking_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> Result<Json<BookingDetailView>, PageRedirect> {
    let (policy, path) = (&services.policy, uri.path());
    let token = require_token(&ctx, policy, path)?;
    let Ok(id) = id.parse::<BookingId>() else {
        return Err(PageRedirect::to("/account/bookings"));
    };

    let booking = account::booking(&services.api, token, id)
        .await
        .map_err(to_login(policy, path))?;
    Ok(Json(BookingDetailView::from(&booking)))
}

pub async fn vehicles_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<VehiclesView>, PageRedirect> {
    let (policy, path) = (&services.policy, uri.path());
    let token = require_token(&ctx, policy, path)?;

    let mut manager = VehicleManager::new(services.api.clone(), token.clone(), Vec::new());
    let vehicles = manager.load().await.map_err(to_login(policy, path))?;
    Ok(Json(VehiclesView {
        vehicles: vehicles.iter().map(VehicleView::from).collect(),
    }))
}

// Actions

pub async fn update_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(input): Json<ProfileInput>,
) -> Result<Json<CustomerProfile>, ActionError> {
    let token = require_session(&ctx)?;
    validate_profile(&input).or_say("Please check the highlighted fields")?;
    let profile = account::update_profile(&services.api, token, &input)
        .await
        .or_say("Could not save your details")?;
    Ok(Json(profile))
}

pub async fn create_vehicle(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(input): Json<VehicleInput>,
) -> Result<(StatusCode, Json<VehicleView>), ActionError> {
    let token = require_session(&ctx)?;
    let mut manager = VehicleManager::new(services.api.clone(), token.clone(), Vec::new());
    let vehicle = manager.create(&input).await.or_say("Could not add this vehicle")?;
    Ok((StatusCode::CREATED, Json(VehicleView::from(vehicle))))
}

pub async fn update_vehicle(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(input): Json<VehicleInput>,
) -> Result<Json<VehicleView>, ActionError> {
    let token = require_session(&ctx)?;
    let id = id.parse::<VehicleId>().or_say("Unknown vehicle")?;
    let mut manager = VehicleManager::new(services.api.clone(), token.clone(), Vec::new());
    let vehicle = manager
        .update(id, &input)
        .await
        .or_say("Could not save this vehicle")?;
    Ok(Json(VehicleView::from(vehicle)))
}

pub async fn delete_vehicle(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ActionError> {
    let token = require_session(&ctx)?;
    let id = id.parse::<VehicleId>().or_say("Unknown vehicle")?;
    let mut manager = VehicleManager::new(services.api.clone(), token.clone(), Vec::new());
    manager.delete(id).await.or_say("Could not remove this vehicle")?;
    Ok(StatusCode::NO_CONTENT)
}
