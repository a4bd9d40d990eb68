//! Payment routes.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_payment_recorded;
use domain::models::{Booking, Payment, PaymentMethod, PaymentStatus};
use domain::services::pricing;
use persistence::repositories::{BookingRepository, PaymentRepository};
use shared::validation::validate_amount;

/// Request body for recording a payment against a booking.
///
/// The gateway interaction is simulated: the client reports the outcome
/// and the server records it, enforcing the amount invariants.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub booking_id: Uuid,
    pub amount: i64,
    pub method: String,
    /// Reported gateway outcome; defaults to COMPLETED.
    pub status: Option<String>,
    pub transaction_id: Option<String>,
}

/// Response body: the payment row and the booking it updated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub payment: Payment,
    pub booking: Booking,
    pub balance_due: i64,
}

/// Fallback transaction id when the client did not supply one.
fn generate_transaction_id() -> String {
    format!("TXN{}", chrono::Utc::now().timestamp_millis())
}

/// POST /payments
///
/// Rejects non-positive amounts and anything that would push the booking
/// past its total; the insert and the `paid_amount` bump are one
/// transaction.
pub async fn record_payment(
    State(state): State<AppState>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), ApiError> {
    validate_amount(request.amount)
        .map_err(|e| ApiError::Validation(e.message.map(|m| m.to_string()).unwrap_or_default()))?;

    let method: PaymentMethod = request
        .method
        .parse()
        .map_err(|_| ApiError::Validation("Unknown payment method".to_string()))?;

    let status = match request.status.as_deref() {
        Some(s) => s
            .parse::<PaymentStatus>()
            .map_err(|_| ApiError::Validation("Unknown payment status".to_string()))?,
        None => PaymentStatus::Completed,
    };

    let bookings = BookingRepository::new(state.pool.clone());
    let booking = bookings
        .find_by_id(request.booking_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

    // paid + amount must never exceed total; the clamp defines the most
    // that could still be accepted. Failed attempts never touch the total
    // so they skip the check.
    let acceptable = pricing::clamp_payment(request.amount, booking.total_amount - booking.paid_amount);
    if status == PaymentStatus::Completed && acceptable != request.amount {
        return Err(ApiError::Validation(format!(
            "Payment of {} would exceed the remaining balance of {}",
            request.amount,
            pricing::balance_due(booking.total_amount, booking.paid_amount)
        )));
    }

    let transaction_id = request
        .transaction_id
        .unwrap_or_else(generate_transaction_id);

    let payments = PaymentRepository::new(state.pool.clone());
    let (payment, booking) = payments
        .record_payment(
            request.booking_id,
            request.amount,
            method.as_str(),
            status.as_str(),
            &transaction_id,
        )
        .await?
        .ok_or_else(|| {
            // A racing payment took the remaining balance first
            ApiError::Conflict("Payment would exceed the remaining balance".to_string())
        })?;

    record_payment_recorded(method.as_str());

    let booking = Booking::from(booking);
    let balance_due = booking.balance_due();

    Ok((
        StatusCode::CREATED,
        Json(PaymentResponse {
            payment: Payment::from(payment),
            booking,
            balance_due,
        }),
    ))
}
