//! Notification feed domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A feed entry created when a booking changes status. The same dispatch
/// that writes the row also pushes a WebSocket frame, so the feed is the
/// read-model of the push channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// What kind of event a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationKind {
    Confirmed,
    Rejected,
    Completed,
    Info,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Confirmed => "CONFIRMED",
            NotificationKind::Rejected => "REJECTED",
            NotificationKind::Completed => "COMPLETED",
            NotificationKind::Info => "INFO",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CONFIRMED" => Ok(NotificationKind::Confirmed),
            "REJECTED" => Ok(NotificationKind::Rejected),
            "COMPLETED" => Ok(NotificationKind::Completed),
            "INFO" => Ok(NotificationKind::Info),
            _ => Err(format!("Invalid notification kind: {}", s)),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            NotificationKind::Confirmed,
            NotificationKind::Rejected,
            NotificationKind::Completed,
            NotificationKind::Info,
        ] {
            assert_eq!(NotificationKind::from_str(kind.as_str()).unwrap(), kind);
        }
        assert!(NotificationKind::from_str("SPAM").is_err());
    }
}
