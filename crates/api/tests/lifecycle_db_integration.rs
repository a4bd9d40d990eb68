//! Database-backed tests for the booking lifecycle race guards.
//!
//! These run against a live PostgreSQL and are ignored by default:
//!
//! ```bash
//! TEST_DATABASE_URL=postgres://... cargo test -- --ignored
//! ```

mod common;

use axum::http::{Method, StatusCode};
use chrono::Utc;
use rand::Rng;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use persistence::entities::BookingEntity;
use persistence::repositories::{
    BookingRepository, CategoryRepository, PaymentRepository, UserRepository,
};

async fn connect() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

fn random_phone() -> String {
    format!("9{:09}", rand::thread_rng().gen_range(0..1_000_000_000u64))
}

/// Creates an organizer, a provider with a profile, and a PENDING booking
/// for the given total.
async fn seed_booking(pool: &PgPool, total_amount: i64) -> BookingEntity {
    let users = UserRepository::new(pool.clone());
    let organizer = users
        .create_user("Anita Joshi", &random_phone(), "hash", "USER")
        .await
        .expect("Failed to create organizer");

    let categories = CategoryRepository::new(pool.clone());
    let category = categories
        .list()
        .await
        .expect("Failed to list categories")
        .into_iter()
        .next()
        .expect("Seed categories missing");

    let (_, profile) = users
        .create_provider_with_profile(
            "Pandit Sharma",
            &random_phone(),
            "hash",
            category.id,
            5000,
            12,
            Some("Pune"),
        )
        .await
        .expect("Failed to create provider");

    BookingRepository::new(pool.clone())
        .create(
            &format!("BKT{:010}", rand::thread_rng().gen_range(0..10_000_000_000u64)),
            organizer.id,
            profile.id,
            "Satyanarayan Puja",
            Utc::now(),
            total_amount,
            0,
        )
        .await
        .expect("Failed to create booking")
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_stale_transition_never_overwrites_a_moved_booking() {
    let pool = connect().await;
    let bookings = BookingRepository::new(pool.clone());
    let booking = seed_booking(&pool, 5000).await;

    let confirmed = bookings
        .update_status(booking.id, "PENDING", "CONFIRMED")
        .await
        .unwrap();
    assert_eq!(confirmed.unwrap().status, "CONFIRMED");

    let completed = bookings
        .update_status(booking.id, "CONFIRMED", "COMPLETED")
        .await
        .unwrap();
    assert_eq!(completed.unwrap().status, "COMPLETED");

    // A writer that validated against the stale PENDING read loses the swap
    let stale = bookings
        .update_status(booking.id, "PENDING", "CANCELLED")
        .await
        .unwrap();
    assert!(stale.is_none());

    let current = bookings.find_by_id(booking.id).await.unwrap().unwrap();
    assert_eq!(current.status, "COMPLETED");
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_payment_overrun_is_refused_without_a_database_error() {
    let pool = connect().await;
    let payments = PaymentRepository::new(pool.clone());
    let booking = seed_booking(&pool, 5000).await;

    let first = payments
        .record_payment(booking.id, 3000, "UPI", "COMPLETED", "TXN1")
        .await
        .unwrap();
    assert_eq!(first.unwrap().1.paid_amount, 3000);

    // The second 3000 would push paid past the 5000 total; the guard
    // refuses it cleanly instead of tripping the schema constraint
    let second = payments
        .record_payment(booking.id, 3000, "UPI", "COMPLETED", "TXN2")
        .await
        .unwrap();
    assert!(second.is_none());

    let bookings = BookingRepository::new(pool.clone());
    let current = bookings.find_by_id(booking.id).await.unwrap().unwrap();
    assert_eq!(current.paid_amount, 3000);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_failed_payment_leaves_paid_amount_untouched() {
    let pool = connect().await;
    let payments = PaymentRepository::new(pool.clone());
    let booking = seed_booking(&pool, 5000).await;

    let (payment, updated) = payments
        .record_payment(booking.id, 2000, "CARD", "FAILED", "TXN3")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.status, "FAILED");
    assert_eq!(updated.paid_amount, 0);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_payment_past_total_returns_conflict_over_http() {
    let pool = connect().await;
    let booking = seed_booking(&pool, 5000).await;

    let payments = PaymentRepository::new(pool.clone());
    payments
        .record_payment(booking.id, 5000, "UPI", "COMPLETED", "TXN4")
        .await
        .unwrap()
        .unwrap();

    let app = common::create_test_app();
    let request = common::json_request(
        Method::POST,
        "/payments",
        json!({
            "bookingId": booking.id,
            "amount": 1000,
            "method": "UPI"
        }),
    );
    let response = app.oneshot(request).await.unwrap();
    // The handler's pre-check sees the settled balance and rejects with 400
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
