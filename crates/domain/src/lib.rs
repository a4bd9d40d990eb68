//! Domain layer for the BhaktiSetu backend.
//!
//! Pure domain models and services with no persistence or transport
//! dependencies: actors and roles, the category taxonomy, provider
//! profiles, the booking status state machine, payment arithmetic and
//! category-name matching.

pub mod models;
pub mod services;
