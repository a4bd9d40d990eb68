//! Booking repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{BookingEntity, ProviderBookingRow, ProviderStatsRow};
use crate::metrics::QueryTimer;

const BOOKING_COLUMNS: &str = "id, booking_reference, organizer_id, provider_id, \
     event_name, event_date, total_amount, paid_amount, status, created_at, updated_at";

/// Repository for bookings and their lifecycle.
#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Creates a new BookingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a booking in PENDING state with an optional initial payment
    /// already clamped by the caller.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        booking_reference: &str,
        organizer_id: Uuid,
        provider_id: Uuid,
        event_name: &str,
        event_date: DateTime<Utc>,
        total_amount: i64,
        paid_amount: i64,
    ) -> Result<BookingEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_booking");
        let result = sqlx::query_as::<_, BookingEntity>(&format!(
            r#"
            INSERT INTO bookings
                (booking_reference, organizer_id, provider_id, event_name,
                 event_date, total_amount, paid_amount, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'PENDING')
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking_reference)
        .bind(organizer_id)
        .bind(provider_id)
        .bind(event_name)
        .bind(event_date)
        .bind(total_amount)
        .bind(paid_amount)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a booking by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_booking_by_id");
        let result = sqlx::query_as::<_, BookingEntity>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set a booking's status, but only if the row still holds the status
    /// the caller validated the transition against. Returns `None` when the
    /// row is gone or has moved since that read.
    pub async fn update_status(
        &self,
        id: Uuid,
        from: &str,
        to: &str,
    ) -> Result<Option<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_booking_status");
        let result = sqlx::query_as::<_, BookingEntity>(&format!(
            r#"
            UPDATE bookings
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List an organizer's bookings with provider display fields, newest first.
    pub async fn list_for_organizer(
        &self,
        organizer_id: Uuid,
    ) -> Result<Vec<ProviderBookingRow>, sqlx::Error> {
        let timer = QueryTimer::new("list_bookings_for_organizer");
        let result = sqlx::query_as::<_, ProviderBookingRow>(
            r#"
            SELECT b.id, b.booking_reference,
                   b.organizer_id, u.full_name AS organizer_name, u.phone AS organizer_phone,
                   b.provider_id, p.full_name AS provider_name, p.profile_image AS provider_image,
                   b.event_name, b.event_date, b.total_amount, b.paid_amount,
                   b.status, b.created_at
            FROM bookings b
            JOIN users u ON u.id = b.organizer_id
            JOIN provider_profiles p ON p.id = b.provider_id
            WHERE b.organizer_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(organizer_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a provider's incoming bookings with organizer contact fields,
    /// newest first. `provider_id` is the profile id, not the account id.
    pub async fn list_for_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Vec<ProviderBookingRow>, sqlx::Error> {
        let timer = QueryTimer::new("list_bookings_for_provider");
        let result = sqlx::query_as::<_, ProviderBookingRow>(
            r#"
            SELECT b.id, b.booking_reference,
                   b.organizer_id, u.full_name AS organizer_name, u.phone AS organizer_phone,
                   b.provider_id, p.full_name AS provider_name, p.profile_image AS provider_image,
                   b.event_name, b.event_date, b.total_amount, b.paid_amount,
                   b.status, b.created_at
            FROM bookings b
            JOIN users u ON u.id = b.organizer_id
            JOIN provider_profiles p ON p.id = b.provider_id
            WHERE b.provider_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Aggregate booking counts and completed earnings for a provider.
    pub async fn stats_for_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<ProviderStatsRow, sqlx::Error> {
        let timer = QueryTimer::new("booking_stats_for_provider");
        let result = sqlx::query_as::<_, ProviderStatsRow>(
            r#"
            SELECT COUNT(*) AS total_bookings,
                   COUNT(*) FILTER (WHERE status = 'PENDING') AS pending,
                   COUNT(*) FILTER (WHERE status = 'CONFIRMED') AS confirmed,
                   COUNT(*) FILTER (WHERE status = 'COMPLETED') AS completed,
                   COALESCE(SUM(paid_amount) FILTER (WHERE status <> 'REJECTED'), 0)::BIGINT AS earnings
            FROM bookings
            WHERE provider_id = $1
            "#,
        )
        .bind(provider_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
