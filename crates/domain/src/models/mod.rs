//! Domain model definitions.

mod booking;
mod category;
mod notification;
mod payment;
mod provider;
mod user;

pub use booking::{Booking, BookingAction, BookingStatus};
pub use category::Category;
pub use notification::{Notification, NotificationKind};
pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use provider::ProviderProfile;
pub use user::{Role, User};
