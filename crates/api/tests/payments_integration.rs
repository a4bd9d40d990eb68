//! Integration tests for payment request validation.

mod common;

use axum::http::{Method, StatusCode};
use common::{create_test_app, json_request, parse_response_body};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn test_record_payment_rejects_zero_amount() {
    let app = create_test_app();

    let request = json_request(
        Method::POST,
        "/payments",
        json!({
            "bookingId": Uuid::new_v4(),
            "amount": 0,
            "method": "UPI"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_record_payment_rejects_negative_amount() {
    let app = create_test_app();

    let request = json_request(
        Method::POST,
        "/payments",
        json!({
            "bookingId": Uuid::new_v4(),
            "amount": -500,
            "method": "CARD"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_record_payment_rejects_unknown_method() {
    let app = create_test_app();

    let request = json_request(
        Method::POST,
        "/payments",
        json!({
            "bookingId": Uuid::new_v4(),
            "amount": 3000,
            "method": "BARTER"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("payment method"));
}

#[tokio::test]
async fn test_record_payment_rejects_unknown_status() {
    let app = create_test_app();

    let request = json_request(
        Method::POST,
        "/payments",
        json!({
            "bookingId": Uuid::new_v4(),
            "amount": 3000,
            "method": "UPI",
            "status": "REFUNDED"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("payment status"));
}
