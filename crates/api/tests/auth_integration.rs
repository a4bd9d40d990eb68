//! Integration tests for the signup validation surface.
//!
//! Every case here is rejected before the handler touches the database.

mod common;

use axum::http::{Method, StatusCode};
use common::{create_test_app, json_request, parse_response_body};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_signup_rejects_bad_phone() {
    let app = create_test_app();

    let request = json_request(
        Method::POST,
        "/users/signup",
        json!({
            "fullName": "Anita Joshi",
            "phone": "12345",
            "password": "bhakti123",
            "role": "USER"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_signup_rejects_short_password() {
    let app = create_test_app();

    let request = json_request(
        Method::POST,
        "/users/signup",
        json!({
            "fullName": "Anita Joshi",
            "phone": "9812345678",
            "password": "om",
            "role": "USER"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_rejects_admin_role() {
    let app = create_test_app();

    let request = json_request(
        Method::POST,
        "/users/signup",
        json!({
            "fullName": "Anita Joshi",
            "phone": "9812345678",
            "password": "bhakti123",
            "role": "ADMIN"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Admin accounts"));
}

#[tokio::test]
async fn test_signup_rejects_unknown_role() {
    let app = create_test_app();

    let request = json_request(
        Method::POST,
        "/users/signup",
        json!({
            "fullName": "Anita Joshi",
            "phone": "9812345678",
            "password": "bhakti123",
            "role": "WIZARD"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_rejects_missing_fields() {
    let app = create_test_app();

    // No role at all: the body fails deserialization
    let request = json_request(
        Method::POST,
        "/users/signup",
        json!({
            "fullName": "Anita Joshi",
            "phone": "9812345678",
            "password": "bhakti123"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_rejects_empty_phone() {
    let app = create_test_app();

    let request = json_request(
        Method::POST,
        "/users/login",
        json!({
            "phone": "",
            "password": "bhakti123"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
