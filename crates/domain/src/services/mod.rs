//! Domain services: pure business logic with no I/O.

pub mod category_match;
pub mod pricing;
