//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Ten digit Indian mobile number, optionally prefixed with +91 or 0.
    static ref PHONE_REGEX: Regex = Regex::new(r"^(\+91|0)?[6-9]\d{9}$").unwrap();
}

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validates a phone number used as the login identifier.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(phone.trim()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone must be a valid 10-digit mobile number".into());
        Err(err)
    }
}

/// Validates that a monetary amount (integer rupees) is positive.
pub fn validate_amount(amount: i64) -> Result<(), ValidationError> {
    if amount > 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount_range");
        err.message = Some("Amount must be greater than zero".into());
        Err(err)
    }
}

/// Validates that an event name is non-empty after trimming.
pub fn validate_event_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("event_name_empty");
        err.message = Some("Event name must not be empty".into());
        Err(err)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_accepts_bare_ten_digits() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("6000000001").is_ok());
    }

    #[test]
    fn test_validate_phone_accepts_prefixes() {
        assert!(validate_phone("+919876543210").is_ok());
        assert!(validate_phone("09876543210").is_ok());
    }

    #[test]
    fn test_validate_phone_rejects_bad_numbers() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("5876543210").is_err()); // must start 6-9
        assert!(validate_phone("98765432101").is_err()); // eleven digits
        assert!(validate_phone("abcdefghij").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(1).is_ok());
        assert!(validate_amount(5000).is_ok());
        assert!(validate_amount(0).is_err());
        assert!(validate_amount(-100).is_err());
    }

    #[test]
    fn test_validate_event_name() {
        assert!(validate_event_name("Janmashtami Kirtan").is_ok());
        assert!(validate_event_name("").is_err());
        assert!(validate_event_name("   ").is_err());
    }
}
