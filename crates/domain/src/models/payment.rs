//! Payment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// One payment attempt against a booking. The amount may be less than the
/// booking total (advance payment); the remainder is settled at the venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    /// Paid amount in integer rupees.
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Upi,
    Card,
    Netbanking,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "CARD",
            PaymentMethod::Netbanking => "NETBANKING",
            PaymentMethod::Cash => "CASH",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "UPI" => Ok(PaymentMethod::Upi),
            "CARD" => Ok(PaymentMethod::Card),
            "NETBANKING" => Ok(PaymentMethod::Netbanking),
            "CASH" => Ok(PaymentMethod::Cash),
            _ => Err(format!("Invalid payment method: {}", s)),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a payment attempt as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "COMPLETED" => Ok(PaymentStatus::Completed),
            "FAILED" => Ok(PaymentStatus::Failed),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_round_trip() {
        for method in [
            PaymentMethod::Upi,
            PaymentMethod::Card,
            PaymentMethod::Netbanking,
            PaymentMethod::Cash,
        ] {
            assert_eq!(
                PaymentMethod::from_str(method.as_str()).unwrap(),
                method
            );
        }
        assert!(PaymentMethod::from_str("CRYPTO").is_err());
    }

    #[test]
    fn test_payment_method_case_insensitive() {
        assert_eq!(PaymentMethod::from_str("upi").unwrap(), PaymentMethod::Upi);
        assert_eq!(
            PaymentMethod::from_str("NetBanking").unwrap(),
            PaymentMethod::Netbanking
        );
    }

    #[test]
    fn test_payment_status_from_str() {
        assert_eq!(
            PaymentStatus::from_str("completed").unwrap(),
            PaymentStatus::Completed
        );
        assert!(PaymentStatus::from_str("PENDING").is_err());
    }
}
