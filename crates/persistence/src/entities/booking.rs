//! Booking entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Database row mapping for the bookings table.
#[derive(Debug, Clone, FromRow)]
pub struct BookingEntity {
    pub id: Uuid,
    pub booking_reference: String,
    pub organizer_id: Uuid,
    pub provider_id: Uuid,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub total_amount: i64,
    pub paid_amount: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingEntity> for domain::models::Booking {
    fn from(entity: BookingEntity) -> Self {
        Self {
            id: entity.id,
            booking_reference: entity.booking_reference,
            organizer_id: entity.organizer_id,
            provider_id: entity.provider_id,
            event_name: entity.event_name,
            event_date: entity.event_date,
            total_amount: entity.total_amount,
            paid_amount: entity.paid_amount,
            status: domain::models::BookingStatus::from_str(&entity.status)
                .unwrap_or(domain::models::BookingStatus::Pending), // Default fallback
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Booking row joined with organizer and provider display fields, for the
/// organizer and provider list views.
#[derive(Debug, Clone, FromRow)]
pub struct ProviderBookingRow {
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
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregated booking counts and earnings for a provider dashboard.
#[derive(Debug, Clone, FromRow)]
pub struct ProviderStatsRow {
    pub total_bookings: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub completed: i64,
    pub earnings: i64,
}
