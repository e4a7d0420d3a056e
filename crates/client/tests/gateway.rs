//! Gateway behavior against a fake backend.
//!
//! | Case | Test |
//! |------|------|
//! | headers and JSON body | `sends_json_bearer_and_cart_session` |
//! | no credentials | `omits_credentials_when_absent` |
//! | 2xx body | `typed_body_on_success` |
//! | 204 | `no_content_is_explicit` |
//! | problem document | `problem_detail_is_passed_through` |
//! | gateway message | `gateway_message_becomes_detail` |
//! | unreadable body | `unparseable_error_uses_status_text` |
//! | transport | `unreachable_backend_is_status_zero` |

use detailing_auth::SessionToken;
use detailing_client::{ApiClient, CallOptions, Reply};
use detailing_core::model::{Cart, LoginRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri()).unwrap()
}

fn token() -> SessionToken {
    SessionToken::from("tok_abc123".to_string())
}

fn cart_json() -> serde_json::Value {
    json!({
        "id": "0190a6a4-7f3e-7c1a-9d1e-3b2f1c0d4e5f",
        "sessionId": "cs_42",
        "items": [{
            "id": "0190a6a4-7f3e-7c1a-9d1e-3b2f1c0d4e60",
            "serviceId": "0190a6a4-7f3e-7c1a-9d1e-3b2f1c0d4e61",
            "serviceName": "Interior Detail",
            "quantity": 2,
            "unitPriceCents": 12500,
            "lineTotalCents": 25000
        }],
        "subtotalCents": 25000
    })
}

#[tokio::test]
async fn sends_json_bearer_and_cart_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "Bearer tok_abc123"))
        .and(header("x-cart-session", "cs_42"))
        .and(body_json(json!({ "email": "sam@example.com", "password": "hunter22" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let options = CallOptions::post()
        .token(Some(&token()))
        .cart_session(Some("cs_42"))
        .json(&LoginRequest {
            email: "sam@example.com".into(),
            password: "hunter22".into(),
        })
        .unwrap();
    let body: serde_json::Value = client(&server).fetch("/auth/login", options).await.unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn omits_credentials_when_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalogue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let _: Vec<serde_json::Value> = client(&server).fetch("/catalogue", CallOptions::get()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    assert!(headers.get("authorization").is_none());
    assert!(headers.get("x-cart-session").is_none());
    assert_eq!(headers.get("content-type").unwrap(), "application/json");
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn base_url_trailing_slash_is_trimmed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&format!("{}/", server.uri())).unwrap();
    let _: serde_json::Value = client.fetch("/me", CallOptions::get()).await.unwrap();
}

#[tokio::test]
async fn typed_body_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json()))
        .mount(&server)
        .await;

    let reply: Reply<Cart> = client(&server).call("/cart", CallOptions::get()).await.unwrap();
    let Reply::Content(cart) = reply else {
        panic!("expected a cart");
    };
    assert_eq!(cart.session_id.as_deref(), Some("cs_42"));
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.subtotal_cents.get(), 25_000);
}

#[tokio::test]
async fn no_content_is_explicit() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/cart/items/x"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client(&server);
    let reply: Reply<Cart> = client.call("/cart/items/x", CallOptions::delete()).await.unwrap();
    assert!(reply.is_no_content());

    // Callers that need a body get a 204 error instead of a fabricated value.
    let err = client
        .fetch::<Cart>("/cart/items/x", CallOptions::delete())
        .await
        .unwrap_err();
    assert_eq!(err.status, 204);
    assert_eq!(err.detail, "No Content");

    client.send("/cart/items/x", CallOptions::delete()).await.unwrap();
}

#[tokio::test]
async fn wrong_shape_on_success_is_an_error_with_that_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client(&server).fetch::<Cart>("/cart", CallOptions::get()).await.unwrap_err();
    assert_eq!(err.status, 200);
    assert_eq!(err.title, "Error");
}

#[tokio::test]
async fn problem_detail_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/checkout"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "status": 409,
            "title": "Conflict",
            "detail": "That slot was just taken",
        })))
        .mount(&server)
        .await;

    let err = client(&server).send("/checkout", CallOptions::post()).await.unwrap_err();
    assert_eq!(err.status, 409);
    assert_eq!(err.title, "Conflict");
    assert_eq!(err.detail, "That slot was just taken");
}

#[tokio::test]
async fn gateway_message_becomes_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthorized" })))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch::<serde_json::Value>("/me", CallOptions::get().token(Some(&token())))
        .await
        .unwrap_err();
    assert_eq!(err.status, 401);
    assert_eq!(err.detail, "Unauthorized");
    assert!(err.is_auth_rejection());
}

#[tokio::test]
async fn unparseable_error_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalogue"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream connect error"))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch::<serde_json::Value>("/catalogue", CallOptions::get())
        .await
        .unwrap_err();
    assert_eq!(err.status, 503);
    assert_eq!(err.detail, "Service Unavailable");
    assert_eq!(err.title, "Error");
}

#[tokio::test]
async fn unreachable_backend_is_status_zero() {
    // Nothing listens on the discard port.
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    let err = client
        .fetch::<serde_json::Value>("/catalogue", CallOptions::get())
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.title, "Network Error");
    assert_eq!(err.user_message("Could not load services"), "Could not load services");
}
