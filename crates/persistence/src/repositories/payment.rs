//! Payment repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{BookingEntity, PaymentEntity};
use crate::metrics::QueryTimer;

/// Repository for payments against bookings.
#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a payment attempt and, when it completed, apply it to the
    /// booking's paid total in one transaction. The balance is re-checked
    /// inside the transaction, so racing payments cannot push paid_amount
    /// past total_amount; `None` means the guard lost and nothing was
    /// written. Failed attempts are recorded but leave the booking
    /// untouched.
    pub async fn record_payment(
        &self,
        booking_id: Uuid,
        amount: i64,
        method: &str,
        status: &str,
        transaction_id: &str,
    ) -> Result<Option<(PaymentEntity, BookingEntity)>, sqlx::Error> {
        let timer = QueryTimer::new("record_payment");
        let mut tx = self.pool.begin().await?;

        let payment = sqlx::query_as::<_, PaymentEntity>(
            r#"
            INSERT INTO payments (booking_id, amount, method, status, transaction_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, booking_id, amount, method, status, transaction_id, created_at
            "#,
        )
        .bind(booking_id)
        .bind(amount)
        .bind(method)
        .bind(status)
        .bind(transaction_id)
        .fetch_one(&mut *tx)
        .await?;

        let applied = if status == "COMPLETED" { amount } else { 0 };
        let booking = sqlx::query_as::<_, BookingEntity>(
            r#"
            UPDATE bookings
            SET paid_amount = paid_amount + $2, updated_at = NOW()
            WHERE id = $1 AND paid_amount + $2 <= total_amount
            RETURNING id, booking_reference, organizer_id, provider_id, event_name,
                      event_date, total_amount, paid_amount, status, created_at, updated_at
            "#,
        )
        .bind(booking_id)
        .bind(applied)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(booking) = booking else {
            tx.rollback().await?;
            timer.record();
            return Ok(None);
        };

        tx.commit().await?;
        timer.record();
        Ok(Some((payment, booking)))
    }
}
