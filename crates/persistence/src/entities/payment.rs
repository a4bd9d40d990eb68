//! Payment entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Database row mapping for the payments table.
#[derive(Debug, Clone, FromRow)]
pub struct PaymentEntity {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub amount: i64,
    pub method: String,
    pub status: String,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentEntity> for domain::models::Payment {
    fn from(entity: PaymentEntity) -> Self {
        Self {
            id: entity.id,
            booking_id: entity.booking_id,
            amount: entity.amount,
            method: domain::models::PaymentMethod::from_str(&entity.method)
                .unwrap_or(domain::models::PaymentMethod::Cash), // Default fallback
            status: domain::models::PaymentStatus::from_str(&entity.status)
                .unwrap_or(domain::models::PaymentStatus::Completed), // Default fallback
            transaction_id: entity.transaction_id,
            created_at: entity.created_at,
        }
    }
}
