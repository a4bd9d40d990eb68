//! Application services used by route handlers.

pub mod dispatch;
pub mod storage;
