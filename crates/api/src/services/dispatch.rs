//! Notification dispatch service.
//!
//! Every booking status change goes through [`dispatch_booking_event`]:
//! one call writes the notification feed row and broadcasts the WebSocket
//! frame, so the feed is always the read-model of what was pushed. There
//! is no second channel to drift out of sync.

use serde::Serialize;
use sqlx::PgPool;
use tokio::sync::broadcast;
use uuid::Uuid;

use domain::models::{BookingStatus, NotificationKind};
use persistence::repositories::NotificationRepository;

/// A booking status event pushed to connected WebSocket clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEvent {
    /// The user the event is addressed to. Connections registered for a
    /// different user drop the frame.
    #[serde(skip)]
    pub user_id: Uuid,
    pub event: &'static str,
    pub message: String,
    pub status: BookingStatus,
}

impl BookingEvent {
    pub fn new(user_id: Uuid, message: String, status: BookingStatus) -> Self {
        Self {
            user_id,
            event: "booking_status",
            message,
            status,
        }
    }
}

/// The notification kind a status change produces in the feed.
pub fn kind_for_status(status: BookingStatus) -> NotificationKind {
    match status {
        BookingStatus::Confirmed => NotificationKind::Confirmed,
        BookingStatus::Rejected => NotificationKind::Rejected,
        BookingStatus::Completed => NotificationKind::Completed,
        _ => NotificationKind::Info,
    }
}

/// The human-readable message for a status change on a named event.
pub fn message_for_status(event_name: &str, status: BookingStatus) -> String {
    match status {
        BookingStatus::Confirmed => {
            format!("Your booking for {} has been confirmed", event_name)
        }
        BookingStatus::Rejected => {
            format!("Your booking for {} has been declined", event_name)
        }
        BookingStatus::Completed => {
            format!("Your booking for {} has been marked completed", event_name)
        }
        BookingStatus::Cancelled => {
            format!("The booking for {} has been cancelled", event_name)
        }
        BookingStatus::Pending => format!("Your booking for {} is pending", event_name),
    }
}

/// Writes the feed row and pushes the WebSocket frame for one recipient.
///
/// The broadcast send is best-effort: it only fails when no client is
/// connected, which is the normal case and not an error.
pub async fn dispatch_booking_event(
    pool: &PgPool,
    events: &broadcast::Sender<BookingEvent>,
    user_id: Uuid,
    event_name: &str,
    status: BookingStatus,
) -> Result<(), sqlx::Error> {
    let kind = kind_for_status(status);
    let message = message_for_status(event_name, status);

    NotificationRepository::new(pool.clone())
        .create(user_id, kind.as_str(), &message)
        .await?;

    let _ = events.send(BookingEvent::new(user_id, message, status));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_for_status() {
        assert_eq!(
            kind_for_status(BookingStatus::Confirmed),
            NotificationKind::Confirmed
        );
        assert_eq!(
            kind_for_status(BookingStatus::Rejected),
            NotificationKind::Rejected
        );
        assert_eq!(
            kind_for_status(BookingStatus::Completed),
            NotificationKind::Completed
        );
        assert_eq!(
            kind_for_status(BookingStatus::Cancelled),
            NotificationKind::Info
        );
    }

    #[test]
    fn test_message_for_status_names_the_event() {
        let msg = message_for_status("Ganesh Puja", BookingStatus::Confirmed);
        assert!(msg.contains("Ganesh Puja"));
        assert!(msg.contains("confirmed"));
    }

    #[test]
    fn test_booking_event_wire_shape() {
        let event = BookingEvent::new(
            Uuid::new_v4(),
            "Your booking for Satyanarayan Puja has been confirmed".to_string(),
            BookingStatus::Confirmed,
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "booking_status");
        assert_eq!(json["status"], "CONFIRMED");
        // The recipient id routes the frame, it never crosses the wire
        assert!(json.get("userId").is_none());
    }
}
