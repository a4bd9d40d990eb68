//! Repository implementations.

mod booking;
mod category;
mod notification;
mod payment;
mod provider;
mod user;

pub use booking::BookingRepository;
pub use category::CategoryRepository;
pub use notification::NotificationRepository;
pub use payment::PaymentRepository;
pub use provider::ProviderRepository;
pub use user::{UserDirectoryRow, UserRepository};
