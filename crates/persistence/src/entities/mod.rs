//! Entity definitions (database row mappings).

mod booking;
mod category;
mod notification;
mod payment;
mod provider;
mod user;

pub use booking::{BookingEntity, ProviderBookingRow, ProviderStatsRow};
pub use category::CategoryEntity;
pub use notification::NotificationEntity;
pub use payment::PaymentEntity;
pub use provider::ProviderProfileEntity;
pub use user::UserEntity;
