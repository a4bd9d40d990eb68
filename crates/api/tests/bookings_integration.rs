//! Integration tests for booking request validation.

mod common;

use axum::http::{Method, StatusCode};
use common::{create_test_app, json_request, parse_response_body};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn test_create_booking_rejects_blank_event_name() {
    let app = create_test_app();

    let request = json_request(
        Method::POST,
        "/bookings",
        json!({
            "organizerId": Uuid::new_v4(),
            "providerId": Uuid::new_v4(),
            "eventName": "   ",
            "eventDate": "2026-09-15T10:00:00Z",
            "totalAmount": 5000
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_create_booking_rejects_non_positive_amount() {
    let app = create_test_app();

    let request = json_request(
        Method::POST,
        "/bookings",
        json!({
            "organizerId": Uuid::new_v4(),
            "providerId": Uuid::new_v4(),
            "eventName": "Satyanarayan Puja",
            "eventDate": "2026-09-15T10:00:00Z",
            "totalAmount": 0
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_booking_rejects_malformed_ids() {
    let app = create_test_app();

    let request = json_request(
        Method::POST,
        "/bookings",
        json!({
            "organizerId": "not-a-uuid",
            "providerId": Uuid::new_v4(),
            "eventName": "Satyanarayan Puja",
            "eventDate": "2026-09-15T10:00:00Z",
            "totalAmount": 5000
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_status_rejects_unknown_status() {
    let app = create_test_app();

    let request = json_request(
        Method::PATCH,
        &format!("/bookings/{}/status", Uuid::new_v4()),
        json!({ "status": "ON_HOLD" }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
