//! Booking domain model and its status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle state of a booking.
///
/// The server is the sole arbiter of transitions; clients only request them.
/// Legal transitions:
///
/// - `PENDING -> CONFIRMED | REJECTED` (provider accepts/declines)
/// - `CONFIRMED -> COMPLETED` (provider marks done)
/// - any non-terminal `-> CANCELLED` (organizer cancels)
///
/// `REJECTED`, `COMPLETED` and `CANCELLED` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Rejected,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether no further transitions are allowed out of this state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Rejected | BookingStatus::Completed | BookingStatus::Cancelled
        )
    }

    /// Whether a transition from `self` to `next` is legal.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        match (self, next) {
            (BookingStatus::Pending, BookingStatus::Confirmed) => true,
            (BookingStatus::Pending, BookingStatus::Rejected) => true,
            (BookingStatus::Confirmed, BookingStatus::Completed) => true,
            (current, BookingStatus::Cancelled) => !current.is_terminal(),
            _ => false,
        }
    }

    /// The actions a client may legitimately offer for a booking in this
    /// state. Anything else must not be rendered as a control.
    pub fn available_actions(&self) -> &'static [BookingAction] {
        match self {
            BookingStatus::Pending => &[
                BookingAction::Accept,
                BookingAction::Decline,
                BookingAction::Cancel,
            ],
            BookingStatus::Confirmed => &[BookingAction::MarkCompleted, BookingAction::Cancel],
            _ => &[],
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(BookingStatus::Pending),
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "REJECTED" => Ok(BookingStatus::Rejected),
            "COMPLETED" => Ok(BookingStatus::Completed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An action a client may request against a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingAction {
    Accept,
    Decline,
    MarkCompleted,
    Cancel,
}

impl BookingAction {
    /// The status this action requests.
    pub fn target_status(&self) -> BookingStatus {
        match self {
            BookingAction::Accept => BookingStatus::Confirmed,
            BookingAction::Decline => BookingStatus::Rejected,
            BookingAction::MarkCompleted => BookingStatus::Completed,
            BookingAction::Cancel => BookingStatus::Cancelled,
        }
    }
}

/// A booking of a provider by an organizer for a named event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    /// Human-readable reference shown on receipts (e.g. "BKT483920").
    pub booking_reference: String,
    /// The organizer's account id.
    pub organizer_id: Uuid,
    /// The provider *profile* id, never the provider's account id.
    pub provider_id: Uuid,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    /// Agreed total in integer rupees.
    pub total_amount: i64,
    /// Sum of recorded payments; the balance due at the venue is derived
    /// as `total_amount - paid_amount`, never stored.
    pub paid_amount: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Outstanding amount payable at the venue.
    pub fn balance_due(&self) -> i64 {
        self.total_amount - self.paid_amount
    }
}
