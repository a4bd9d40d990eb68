//! Booking lifecycle routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::{record_booking_created, record_booking_transition};
use crate::services::dispatch::dispatch_booking_event;
use domain::models::{Booking, BookingAction, BookingStatus};
use domain::services::pricing;
use persistence::entities::{ProviderBookingRow, ProviderStatsRow};
use persistence::repositories::{BookingRepository, ProviderRepository, UserRepository};
use shared::validation::{validate_amount, validate_event_name};

/// Request body for creating a booking.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub organizer_id: Uuid,

    /// The provider PROFILE id, not the provider's account id.
    pub provider_id: Uuid,

    #[validate(custom(function = "validate_event_name"))]
    pub event_name: String,

    pub event_date: DateTime<Utc>,

    /// Total agreed amount in integer rupees.
    pub total_amount: i64,
}

/// Request body for a status transition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
}

/// A booking as returned by list endpoints: the row plus the display
/// fields and the derived values the client renders.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: Uuid,
    pub booking_reference: String,
    pub organizer_id: Uuid,
    pub organizer_name: String,
    pub organizer_phone: String,
    pub provider_id: Uuid,
    pub provider_name: String,
    pub provider_image: Option<String>,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub total_amount: i64,
    pub paid_amount: i64,
    pub balance_due: i64,
    pub status: BookingStatus,
    pub available_actions: &'static [BookingAction],
    pub created_at: DateTime<Utc>,
}

impl BookingView {
    /// Fails on a stored status outside the state machine rather than
    /// mislabeling the booking.
    fn try_from_row(row: ProviderBookingRow) -> Result<Self, String> {
        let status: BookingStatus = row.status.parse()?;
        Ok(Self {
            id: row.id,
            booking_reference: row.booking_reference,
            organizer_id: row.organizer_id,
            organizer_name: row.organizer_name,
            organizer_phone: row.organizer_phone,
            provider_id: row.provider_id,
            provider_name: row.provider_name,
            provider_image: row.provider_image,
            event_name: row.event_name,
            event_date: row.event_date,
            total_amount: row.total_amount,
            paid_amount: row.paid_amount,
            balance_due: pricing::balance_due(row.total_amount, row.paid_amount),
            status,
            available_actions: status.available_actions(),
            created_at: row.created_at,
        })
    }
}

/// Provider dashboard statistics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStats {
    pub total_bookings: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub completed: i64,
    pub earnings: i64,
}

impl From<ProviderStatsRow> for ProviderStats {
    fn from(row: ProviderStatsRow) -> Self {
        Self {
            total_bookings: row.total_bookings,
            pending: row.pending,
            confirmed: row.confirmed,
            completed: row.completed,
            earnings: row.earnings,
        }
    }
}

/// Generates a human-readable booking reference.
fn generate_booking_reference() -> String {
    let digits: u64 = rand::thread_rng().gen_range(0..10_000_000_000);
    format!("BKT{:010}", digits)
}

/// POST /bookings
///
/// Creates a booking in PENDING state with nothing paid. The organizer
/// and the provider profile are both checked before any row is written.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    request.validate()?;
    validate_amount(request.total_amount)
        .map_err(|e| ApiError::Validation(e.message.map(|m| m.to_string()).unwrap_or_default()))?;

    let users = UserRepository::new(state.pool.clone());
    if users.find_by_id(request.organizer_id).await?.is_none() {
        return Err(ApiError::Validation("Unknown organizer".to_string()));
    }

    let providers = ProviderRepository::new(state.pool.clone());
    if providers.find_by_id(request.provider_id).await?.is_none() {
        return Err(ApiError::NotFound("Provider not found".to_string()));
    }

    let bookings = BookingRepository::new(state.pool.clone());
    let booking = bookings
        .create(
            &generate_booking_reference(),
            request.organizer_id,
            request.provider_id,
            request.event_name.trim(),
            request.event_date,
            request.total_amount,
            0,
        )
        .await?;

    record_booking_created();

    Ok((StatusCode::CREATED, Json(Booking::from(booking))))
}

/// PATCH /bookings/:id/status
///
/// Validates the requested transition against the state machine, persists
/// it, and dispatches the notification (feed row + WebSocket frame) to the
/// affected party: the organizer for provider decisions, the provider for
/// an organizer cancellation.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Booking>, ApiError> {
    let bookings = BookingRepository::new(state.pool.clone());
    let current = bookings
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

    let current_status: BookingStatus = current
        .status
        .parse()
        .map_err(|e: String| ApiError::Internal(e))?;
    let next = request.status;

    if !current_status.can_transition_to(next) {
        return Err(ApiError::Conflict(format!(
            "Cannot change booking from {} to {}",
            current_status, next
        )));
    }

    // Compare-and-swap: the write only lands if the row still holds the
    // status the transition was validated against.
    let updated = match bookings
        .update_status(id, current_status.as_str(), next.as_str())
        .await?
    {
        Some(booking) => booking,
        None => {
            let now = bookings
                .find_by_id(id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;
            return Err(ApiError::Conflict(format!(
                "Cannot change booking from {} to {}",
                now.status, next
            )));
        }
    };

    record_booking_transition(next.as_str());

    // Cancellations notify the provider; everything else the organizer.
    let recipient = if next == BookingStatus::Cancelled {
        let providers = ProviderRepository::new(state.pool.clone());
        providers
            .find_by_id(updated.provider_id)
            .await?
            .map(|p| p.user_id)
    } else {
        Some(updated.organizer_id)
    };

    if let Some(user_id) = recipient {
        dispatch_booking_event(&state.pool, &state.events, user_id, &updated.event_name, next)
            .await?;
    }

    Ok(Json(Booking::from(updated)))
}

/// GET /bookings/organizer/:user_id
pub async fn list_organizer_bookings(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<BookingView>>, ApiError> {
    let bookings = BookingRepository::new(state.pool.clone());
    let rows = bookings.list_for_organizer(user_id).await?;
    let views = rows
        .into_iter()
        .map(BookingView::try_from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ApiError::Internal)?;
    Ok(Json(views))
}

/// GET /bookings/provider/:provider_id
pub async fn list_provider_bookings(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<Vec<BookingView>>, ApiError> {
    let bookings = BookingRepository::new(state.pool.clone());
    let rows = bookings.list_for_provider(provider_id).await?;
    let views = rows
        .into_iter()
        .map(BookingView::try_from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ApiError::Internal)?;
    Ok(Json(views))
}

/// GET /bookings/stats/:provider_id
pub async fn provider_stats(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<ProviderStats>, ApiError> {
    let bookings = BookingRepository::new(state.pool.clone());
    let stats = bookings.stats_for_provider(provider_id).await?;
    Ok(Json(ProviderStats::from(stats)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_reference_format() {
        let reference = generate_booking_reference();
        assert!(reference.starts_with("BKT"));
        assert_eq!(reference.len(), 13);
        assert!(reference[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_create_request_rejects_blank_event_name() {
        let request = CreateBookingRequest {
            organizer_id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            event_name: "   ".to_string(),
            event_date: Utc::now(),
            total_amount: 5000,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_accepts_named_event() {
        let request = CreateBookingRequest {
            organizer_id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            event_name: "Ganesh Chaturthi Puja".to_string(),
            event_date: Utc::now(),
            total_amount: 5000,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_booking_view_derives_balance_and_actions() {
        let row = ProviderBookingRow {
            id: Uuid::new_v4(),
            booking_reference: "BKT0000000001".to_string(),
            organizer_id: Uuid::new_v4(),
            organizer_name: "Anita Joshi".to_string(),
            organizer_phone: "9812345678".to_string(),
            provider_id: Uuid::new_v4(),
            provider_name: "Pandit Sharma".to_string(),
            provider_image: None,
            event_name: "Satyanarayan Puja".to_string(),
            event_date: Utc::now(),
            total_amount: 5000,
            paid_amount: 3000,
            status: "PENDING".to_string(),
            created_at: Utc::now(),
        };
        let view = BookingView::try_from_row(row).unwrap();
        assert_eq!(view.balance_due, 2000);
        assert!(view.available_actions.contains(&BookingAction::Accept));
        assert!(view.available_actions.contains(&BookingAction::Decline));
        assert!(view.available_actions.contains(&BookingAction::Cancel));
    }

    #[test]
    fn test_booking_view_terminal_state_has_no_actions() {
        let row = ProviderBookingRow {
            id: Uuid::new_v4(),
            booking_reference: "BKT0000000002".to_string(),
            organizer_id: Uuid::new_v4(),
            organizer_name: "Anita Joshi".to_string(),
            organizer_phone: "9812345678".to_string(),
            provider_id: Uuid::new_v4(),
            provider_name: "Pandit Sharma".to_string(),
            provider_image: None,
            event_name: "Satyanarayan Puja".to_string(),
            event_date: Utc::now(),
            total_amount: 5000,
            paid_amount: 5000,
            status: "COMPLETED".to_string(),
            created_at: Utc::now(),
        };
        let view = BookingView::try_from_row(row).unwrap();
        assert!(view.available_actions.is_empty());
        assert_eq!(view.balance_due, 0);
    }

    #[test]
    fn test_booking_view_rejects_corrupt_status() {
        let row = ProviderBookingRow {
            id: Uuid::new_v4(),
            booking_reference: "BKT0000000003".to_string(),
            organizer_id: Uuid::new_v4(),
            organizer_name: "Anita Joshi".to_string(),
            organizer_phone: "9812345678".to_string(),
            provider_id: Uuid::new_v4(),
            provider_name: "Pandit Sharma".to_string(),
            provider_image: None,
            event_name: "Satyanarayan Puja".to_string(),
            event_date: Utc::now(),
            total_amount: 5000,
            paid_amount: 0,
            status: "ARCHIVED".to_string(),
            created_at: Utc::now(),
        };
        assert!(BookingView::try_from_row(row).is_err());
    }
}
