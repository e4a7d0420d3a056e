//! Widgets only change their local state after the backend accepts.

use detailing_auth::SessionToken;
use detailing_client::ApiClient;
use detailing_client::widgets::{BookingBoard, CartWidget, ScheduleEditor, VehicleManager, WidgetError};
use detailing_core::model::{
    BlackoutInput, Booking, BookingStatus, CartItemRequest, ScheduleDayInput, StatusUpdate,
    VehicleInput, VehicleSize, Weekday,
};
use detailing_core::{BookingId, CartItemId, ServiceId};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ITEM_A: &str = "0190a6a4-7f3e-7c1a-9d1e-3b2f1c0d4e60";
const ITEM_B: &str = "0190a6a4-7f3e-7c1a-9d1e-3b2f1c0d4e62";
const BOOKING: &str = "0190a6a4-7f3e-7c1a-9d1e-3b2f1c0d4e70";

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri()).unwrap()
}

fn token() -> SessionToken {
    SessionToken::from("tok_admin".to_string())
}

fn cart_json(session: Option<&str>) -> serde_json::Value {
    json!({
        "id": "0190a6a4-7f3e-7c1a-9d1e-3b2f1c0d4e5f",
        "sessionId": session,
        "items": [
            {
                "id": ITEM_A,
                "serviceId": "0190a6a4-7f3e-7c1a-9d1e-3b2f1c0d4e61",
                "serviceName": "Exterior Wash",
                "quantity": 1,
                "unitPriceCents": 4000,
                "lineTotalCents": 4000
            },
            {
                "id": ITEM_B,
                "serviceId": "0190a6a4-7f3e-7c1a-9d1e-3b2f1c0d4e63",
                "serviceName": "Clay Bar",
                "quantity": 1,
                "unitPriceCents": 6000,
                "lineTotalCents": 6000
            }
        ],
        "subtotalCents": 10000
    })
}

fn booking_json(status: &str) -> serde_json::Value {
    json!({
        "id": BOOKING,
        "reference": "BK-1042",
        "status": status,
        "scheduledDate": "2026-11-03",
        "startTime": "09:30",
        "totalCents": 18000,
        "depositCents": 4500,
        "createdAt": "2026-10-01T12:00:00Z"
    })
}

#[tokio::test]
async fn cart_404_is_an_empty_cart() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Cart not found" })))
        .mount(&server)
        .await;

    let mut widget = CartWidget::new(client(&server), None, None);
    assert!(widget.load().await.unwrap().is_none());
    assert_eq!(widget.item_count(), 0);
}

#[tokio::test]
async fn cart_load_propagates_other_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut widget = CartWidget::new(client(&server), None, None);
    let err = widget.load().await.unwrap_err();
    assert_eq!(err.status, 500);
}

#[tokio::test]
async fn adding_adopts_issued_cart_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cart/items"))
        .respond_with(ResponseTemplate::new(201).set_body_json(cart_json(Some("cs_new"))))
        .mount(&server)
        .await;

    let mut widget = CartWidget::new(client(&server), None, None);
    let req = CartItemRequest {
        service_id: ServiceId::new(),
        vehicle_id: None,
        quantity: 1,
    };
    widget.add(&req).await.unwrap();
    assert_eq!(widget.cart_session(), Some("cs_new"));
    assert_eq!(widget.item_count(), 2);
}

#[tokio::test]
async fn zero_quantity_is_rejected_before_sending() {
    let server = MockServer::start().await;
    let mut widget = CartWidget::new(client(&server), None, None);
    let req = CartItemRequest {
        service_id: ServiceId::new(),
        vehicle_id: None,
        quantity: 0,
    };
    assert!(matches!(widget.add(&req).await, Err(WidgetError::Invalid(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn removal_without_body_is_applied_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .and(header("x-cart-session", "cs_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(None)))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/cart/items/{ITEM_B}")))
        .and(header("x-cart-session", "cs_1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = CartWidget::new(client(&server), None, Some("cs_1".into()));
    widget.load().await.unwrap();
    let cart = widget.remove(ITEM_B.parse::<CartItemId>().unwrap()).await.unwrap().unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.subtotal_cents.get(), 4000);
    // The known session survives a response that omits it.
    assert_eq!(cart.session_id.as_deref(), Some("cs_1"));
}

#[tokio::test]
async fn quantity_zero_deletes_the_line() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/cart/items/{ITEM_A}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = CartWidget::new(client(&server), Some(token()), None);
    widget.set_quantity(ITEM_A.parse().unwrap(), 0).await.unwrap();
}

#[tokio::test]
async fn failed_vehicle_save_leaves_list_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/me/vehicles"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "title": "Validation Failed",
            "detail": "Plate already registered",
            "errors": { "licensePlate": ["already registered"] }
        })))
        .mount(&server)
        .await;

    let mut manager = VehicleManager::new(client(&server), token(), Vec::new());
    let input = VehicleInput {
        make: "Mazda".into(),
        model: "CX-5".into(),
        year: Some(2019),
        color: None,
        license_plate: Some("AB12 CDE".into()),
        size: VehicleSize::Medium,
    };
    let err = manager.create(&input).await.unwrap_err();
    let WidgetError::Api(api) = err else {
        panic!("expected backend rejection");
    };
    assert_eq!(api.field_errors("licensePlate"), ["already registered"]);
    assert!(manager.vehicles().is_empty());
}

#[tokio::test]
async fn vehicle_created_is_appended() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/me/vehicles"))
        .and(body_json(json!({ "make": "Mazda", "model": "CX-5", "size": "medium" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "0190a6a4-7f3e-7c1a-9d1e-3b2f1c0d4e80",
            "make": "Mazda",
            "model": "CX-5",
            "size": "medium"
        })))
        .mount(&server)
        .await;

    let mut manager = VehicleManager::new(client(&server), token(), Vec::new());
    let input = VehicleInput {
        make: "Mazda".into(),
        model: "CX-5".into(),
        year: None,
        color: None,
        license_plate: None,
        size: VehicleSize::Medium,
    };
    let created = manager.create(&input).await.unwrap();
    assert_eq!(created.display_name(), "Mazda CX-5");
    assert_eq!(manager.vehicles().len(), 1);
}

#[tokio::test]
async fn status_change_with_and_without_echo() {
    let server = MockServer::start().await;
    let booking: Booking = serde_json::from_value(booking_json("pending")).unwrap();
    let id: BookingId = BOOKING.parse().unwrap();

    Mock::given(method("POST"))
        .and(path(format!("/admin/bookings/{BOOKING}/status")))
        .and(body_json(json!({ "status": "confirmed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_json("confirmed")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/admin/bookings/{BOOKING}/status")))
        .and(body_json(json!({ "status": "in_progress" })))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/admin/bookings/{BOOKING}/status")))
        .and(body_json(json!({ "status": "pending" })))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "detail": "Cannot reopen" })))
        .mount(&server)
        .await;

    let mut board = BookingBoard::new(client(&server), token(), vec![booking]);
    let update = |status| StatusUpdate { status, note: None };

    let applied = board.update_status(id, &update(BookingStatus::Confirmed)).await.unwrap();
    assert_eq!(applied.map(|b| b.status), Some(BookingStatus::Confirmed));
    assert_eq!(board.bookings()[0].status, BookingStatus::Confirmed);

    let applied = board.update_status(id, &update(BookingStatus::InProgress)).await.unwrap();
    assert_eq!(applied.map(|b| b.status), Some(BookingStatus::InProgress));
    assert_eq!(board.bookings()[0].status, BookingStatus::InProgress);

    let err = board.update_status(id, &update(BookingStatus::Pending)).await.unwrap_err();
    assert_eq!(err.detail, "Cannot reopen");
    assert_eq!(board.bookings()[0].status, BookingStatus::InProgress);
    assert_eq!(board.counts()[&BookingStatus::InProgress], 1);
}

#[tokio::test]
async fn silent_status_change_on_an_unloaded_board_yields_nothing() {
    let server = MockServer::start().await;
    let id: BookingId = BOOKING.parse().unwrap();
    Mock::given(method("POST"))
        .and(path(format!("/admin/bookings/{BOOKING}/status")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut board = BookingBoard::new(client(&server), token(), Vec::new());
    let applied = board
        .update_status(id, &StatusUpdate { status: BookingStatus::Cancelled, note: None })
        .await
        .unwrap();
    assert!(applied.is_none());
    assert!(board.bookings().is_empty());
}

#[tokio::test]
async fn schedule_editor_loads_both_lists_and_keeps_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/schedule"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "weekday": 3, "isOpen": true, "openTime": "08:00", "closeTime": "17:00" },
            { "weekday": 1, "isOpen": true, "openTime": "08:00", "closeTime": "17:00" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/blackouts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/schedule/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "weekday": 2, "isOpen": false })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/admin/blackouts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "0190a6a4-7f3e-7c1a-9d1e-3b2f1c0d4e90",
            "startDate": "2026-12-24",
            "endDate": "2026-12-26",
            "reason": "Holidays"
        })))
        .mount(&server)
        .await;

    let mut editor = ScheduleEditor::new(client(&server), token());
    editor.load().await.unwrap();
    let days: Vec<u8> = editor.days().iter().map(|d| d.weekday.number()).collect();
    assert_eq!(days, [1, 3]);

    let closed = ScheduleDayInput {
        is_open: false,
        open_time: None,
        close_time: None,
        max_bookings: None,
    };
    let saved = editor.save_day(Weekday::new(2).unwrap(), &closed).await.unwrap();
    assert_eq!(saved.weekday.number(), 2);
    assert!(!saved.is_open);
    let days: Vec<u8> = editor.days().iter().map(|d| d.weekday.number()).collect();
    assert_eq!(days, [1, 2, 3]);

    let holidays = BlackoutInput {
        start_date: "2026-12-24".parse().unwrap(),
        end_date: "2026-12-26".parse().unwrap(),
        reason: Some("Holidays".into()),
    };
    let added = editor.add_blackout(&holidays).await.unwrap();
    assert_eq!(added.reason.as_deref(), Some("Holidays"));
    assert_eq!(editor.blackouts().len(), 1);
}

#[tokio::test]
async fn schedule_editor_load_fails_as_a_whole() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/schedule"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "weekday": 1, "isOpen": true }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/blackouts"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Forbidden" })))
        .mount(&server)
        .await;

    let mut editor = ScheduleEditor::new(client(&server), token());
    let err = editor.load().await.unwrap_err();
    assert!(err.is_auth_rejection());
    assert!(editor.days().is_empty());
}

#[tokio::test]
async fn inverted_blackout_is_rejected_locally() {
    let server = MockServer::start().await;
    let mut editor = ScheduleEditor::new(client(&server), token());
    let input = BlackoutInput {
        start_date: "2026-12-26".parse().unwrap(),
        end_date: "2026-12-24".parse().unwrap(),
        reason: None,
    };
    assert!(matches!(editor.add_blackout(&input).await, Err(WidgetError::Invalid(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}
