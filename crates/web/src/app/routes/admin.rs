//! Admin console. Every page first checks `/me` for the sysop flag; the
//! actions rely on the backend, which answers 403 to non-admin tokens.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, OriginalUri, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono::Utc;
use serde::Deserialize;

use detailing_auth::SessionToken;
use detailing_client::endpoints::admin::{self, ServiceRecordFilter};
use detailing_client::widgets::{BookingBoard, ScheduleEditor};
use detailing_core::model::{
    BlackoutInput, BookingStatus, ScheduleDayInput, ServiceInput, ServiceRecordInput, StatusUpdate,
    User, Weekday,
};
use detailing_core::query::{BookingFilter, BookingSort, count_by_status, search_customers, sort_bookings};
use detailing_core::validation::{validate_service, validate_service_record};
use detailing_core::{BlackoutId, BookingId, CustomerId, ServiceId};

use crate::app::errors::{ActionError, ResultExt};
use crate::app::routes::guard::{PageRedirect, require_admin, require_session, require_token, to_login};
use crate::app::services::AppServices;
use crate::app::views::{
    AdminBookingView, AdminBookingsView, AdminCustomerView, AdminCustomersView,
    AdminScheduleView, AdminServiceRecordsView, AdminServicesView, BlackoutView,
    BookingDetailView, BookingRow, BookingTableFilter, CustomerRow, DashboardView,
    ScheduleDayView, ServiceCard, ServiceRecordView, UserView, VehicleView, status_counts,
    status_options,
};
use crate::context::SessionContext;

/// Upcoming bookings shown on the dashboard.
const DASHBOARD_UPCOMING: usize = 10;

pub fn router() -> Router {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/bookings", get(bookings_page))
        .route("/admin/bookings/:id", get(booking_page))
        .route("/admin/bookings/:id/status", post(update_status))
        .route("/admin/customers", get(customers_page))
        .route("/admin/customers/:id", get(customer_page))
        .route("/admin/services", get(services_page).post(create_service))
        .route("/admin/services/:id", put(update_service).delete(delete_service))
        .route("/admin/schedule", get(schedule_page))
        .route("/admin/schedule/:weekday", put(save_schedule_day))
        .route("/admin/blackouts", post(create_blackout))
        .route("/admin/blackouts/:id", delete(delete_blackout))
        .route("/admin/service-records", get(service_records_page).post(create_service_record))
}

/// Token plus the admin user, or the redirect that replaces the page.
async fn admin_session(
    services: &AppServices,
    ctx: &SessionContext,
    path: &str,
) -> Result<(SessionToken, User), PageRedirect> {
    let token = require_token(ctx, &services.policy, path)?.clone();
    let (user, _profile) = require_admin(&services.api, &services.policy, &token, path).await?;
    Ok((token, user))
}

// Pages

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<DashboardView>, PageRedirect> {
    let path = uri.path();
    let (token, user) = admin_session(&services, &ctx, path).await?;

    let mut bookings = admin::bookings(&services.api, &token)
        .await
        .map_err(to_login(&services.policy, path))?;
    let counts = status_counts(count_by_status(&bookings));

    let today = Utc::now().date_naive();
    bookings.retain(|b| b.status.is_open() && b.scheduled_date >= today);
    sort_bookings(&mut bookings, BookingSort::DateAsc);

    Ok(Json(DashboardView {
        user: UserView::from(&user),
        counts,
        upcoming: bookings
            .iter()
            .take(DASHBOARD_UPCOMING)
            .map(BookingRow::from)
            .collect(),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingTableQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

pub async fn bookings_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<BookingTableQuery>,
) -> Result<Json<AdminBookingsView>, PageRedirect> {
    let path = uri.path();
    let (token, _user) = admin_session(&services, &ctx, path).await?;

    let mut board = BookingBoard::new(services.api.clone(), token, Vec::new());
    board.load().await.map_err(to_login(&services.policy, path))?;

    // Unknown filter values are ignored rather than rejected.
    let status = query
        .status
        .as_deref()
        .and_then(|s| s.parse::<BookingStatus>().ok());
    let sort_raw = query.sort.unwrap_or_default();
    let sort = sort_raw.parse::<BookingSort>().unwrap_or_default();
    let filter = BookingFilter {
        status,
        search: query.q.clone(),
    };

    Ok(Json(AdminBookingsView {
        counts: status_counts(board.counts()),
        bookings: board.visible(&filter, sort).iter().map(BookingRow::from).collect(),
        filter: BookingTableFilter {
            status,
            q: query.q,
            sort: sort_raw,
        },
    }))
}

pub async fn booking_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> Result<Json<AdminBookingView>, PageRedirect> {
    let path = uri.path();
    let (token, _user) = admin_session(&services, &ctx, path).await?;
    let Ok(id) = id.parse::<BookingId>() else {
        return Err(PageRedirect::to("/admin/bookings"));
    };

    let api = &services.api;
    let records_filter = ServiceRecordFilter {
        booking_id: Some(id),
        ..ServiceRecordFilter::default()
    };
    let (booking, records) = tokio::try_join!(
        admin::booking(api, &token, id),
        admin::service_records(api, &token, records_filter),
    )
    .map_err(to_login(&services.policy, path))?;

    Ok(Json(AdminBookingView {
        booking: BookingDetailView::from(&booking),
        service_records: records.iter().map(ServiceRecordView::from).collect(),
        statuses: status_options(),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

pub async fn customers_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<SearchQuery>,
) -> Result<Json<AdminCustomersView>, PageRedirect> {
    let path = uri.path();
    let (token, _user) = admin_session(&services, &ctx, path).await?;

    let customers = admin::customers(&services.api, &token)
        .await
        .map_err(to_login(&services.policy, path))?;
    let customers = search_customers(customers, query.q.as_deref());

    Ok(Json(AdminCustomersView {
        q: query.q,
        customers: customers.iter().map(CustomerRow::from).collect(),
    }))
}

pub async fn customer_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> Result<Json<AdminCustomerView>, PageRedirect> {
    let path = uri.path();
    let (token, _user) = admin_session(&services, &ctx, path).await?;
    let Ok(id) = id.parse::<CustomerId>() else {
        return Err(PageRedirect::to("/admin/customers"));
    };

    let api = &services.api;
    let records_filter = ServiceRecordFilter {
        customer_id: Some(id),
        ..ServiceRecordFilter::default()
    };
    let (profile, mut bookings, vehicles, records) = tokio::try_join!(
        admin::customer(api, &token, id),
        admin::customer_bookings(api, &token, id),
        admin::customer_vehicles(api, &token, id),
        admin::service_records(api, &token, records_filter),
    )
    .map_err(to_login(&services.policy, path))?;
    sort_bookings(&mut bookings, BookingSort::DateDesc);

    Ok(Json(AdminCustomerView {
        profile,
        bookings: bookings.iter().map(BookingRow::from).collect(),
        vehicles: vehicles.iter().map(VehicleView::from).collect(),
        service_records: records.iter().map(ServiceRecordView::from).collect(),
    }))
}

pub async fn services_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<AdminServicesView>, PageRedirect> {
    let path = uri.path();
    let (token, _user) = admin_session(&services, &ctx, path).await?;

    let mut list = admin::services(&services.api, &token)
        .await
        .map_err(to_login(&services.policy, path))?;
    list.sort_by(|a, b| {
        (a.category.as_str(), a.display_order, a.name.as_str())
            .cmp(&(b.category.as_str(), b.display_order, b.name.as_str()))
    });

    Ok(Json(AdminServicesView {
        services: list.iter().map(ServiceCard::from).collect(),
    }))
}

pub async fn schedule_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<AdminScheduleView>, PageRedirect> {
    let path = uri.path();
    let (token, _user) = admin_session(&services, &ctx, path).await?;

    let mut editor = ScheduleEditor::new(services.api.clone(), token);
    editor.load().await.map_err(to_login(&services.policy, path))?;

    Ok(Json(AdminScheduleView {
        days: editor.days().iter().map(ScheduleDayView::from).collect(),
        blackouts: editor.blackouts().iter().map(BlackoutView::from).collect(),
    }))
}

pub async fn service_records_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<AdminServiceRecordsView>, PageRedirect> {
    let path = uri.path();
    let (token, _user) = admin_session(&services, &ctx, path).await?;

    let mut records = admin::service_records(&services.api, &token, ServiceRecordFilter::default())
        .await
        .map_err(to_login(&services.policy, path))?;
    records.sort_by(|a, b| b.performed_on.cmp(&a.performed_on));

    Ok(Json(AdminServiceRecordsView {
        records: records.iter().map(ServiceRecordView::from).collect(),
    }))
}

// Actions

pub async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Response, ActionError> {
    let token = require_session(&ctx)?;
    let id = id.parse::<BookingId>().or_say("Unknown booking")?;

    let mut board = BookingBoard::new(services.api.clone(), token.clone(), Vec::new());
    let applied = board
        .update_status(id, &update)
        .await
        .or_say("Could not change the booking status")?;
    tracing::info!(booking_id = %id, status = %update.status, "booking status changed");

    Ok(match applied {
        Some(booking) => Json(BookingDetailView::from(booking)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub async fn create_service(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(input): Json<ServiceInput>,
) -> Result<(StatusCode, Json<ServiceCard>), ActionError> {
    let token = require_session(&ctx)?;
    validate_service(&input).or_say("Please check the highlighted fields")?;
    let created = admin::create_service(&services.api, token, &input)
        .await
        .or_say("Could not create this service")?;
    Ok((StatusCode::CREATED, Json(ServiceCard::from(&created))))
}

pub async fn update_service(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(input): Json<ServiceInput>,
) -> Result<Json<ServiceCard>, ActionError> {
    let token = require_session(&ctx)?;
    let id = id.parse::<ServiceId>().or_say("Unknown service")?;
    validate_service(&input).or_say("Please check the highlighted fields")?;
    let updated = admin::update_service(&services.api, token, id, &input)
        .await
        .or_say("Could not save this service")?;
    Ok(Json(ServiceCard::from(&updated)))
}

pub async fn delete_service(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ActionError> {
    let token = require_session(&ctx)?;
    let id = id.parse::<ServiceId>().or_say("Unknown service")?;
    admin::delete_service(&services.api, token, id)
        .await
        .or_say("Could not delete this service")?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn save_schedule_day(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(weekday): Path<String>,
    Json(input): Json<ScheduleDayInput>,
) -> Result<Json<ScheduleDayView>, ActionError> {
    let token = require_session(&ctx)?;
    let weekday = weekday
        .parse::<u8>()
        .ok()
        .and_then(|n| Weekday::new(n).ok())
        .ok_or_else(|| detailing_core::DomainError::invalid_value("weekday must be 0..6"))
        .or_say("Unknown weekday")?;
    let mut editor = ScheduleEditor::new(services.api.clone(), token.clone());
    let saved = editor
        .save_day(weekday, &input)
        .await
        .or_say("Could not save opening hours")?;
    Ok(Json(ScheduleDayView::from(saved)))
}

pub async fn create_blackout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(input): Json<BlackoutInput>,
) -> Result<(StatusCode, Json<BlackoutView>), ActionError> {
    let token = require_session(&ctx)?;
    let mut editor = ScheduleEditor::new(services.api.clone(), token.clone());
    let created = editor
        .add_blackout(&input)
        .await
        .or_say("Could not add this closure")?;
    Ok((StatusCode::CREATED, Json(BlackoutView::from(created))))
}

pub async fn delete_blackout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ActionError> {
    let token = require_session(&ctx)?;
    let id = id.parse::<BlackoutId>().or_say("Unknown closure")?;
    ScheduleEditor::new(services.api.clone(), token.clone())
        .remove_blackout(id)
        .await
        .or_say("Could not remove this closure")?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_service_record(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SessionContext>,
    Json(input): Json<ServiceRecordInput>,
) -> Result<(StatusCode, Json<ServiceRecordView>), ActionError> {
    let token = require_session(&ctx)?;
    validate_service_record(&input).or_say("Please check the highlighted fields")?;
    let created = admin::create_service_record(&services.api, token, &input)
        .await
        .or_say("Could not save this service record")?;
    Ok((StatusCode::CREATED, Json(ServiceRecordView::from(&created))))
}
