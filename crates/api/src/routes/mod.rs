//! HTTP route handlers.

pub mod auth;
pub mod bookings;
pub mod categories;
pub mod health;
pub mod notifications;
pub mod payments;
pub mod providers;
pub mod users;
pub mod ws;
