//! Shared utilities and common types for the BhaktiSetu backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Password hashing with Argon2id
//! - JWT token generation and validation
//! - Common validation logic

pub mod jwt;
pub mod password;
pub mod validation;
