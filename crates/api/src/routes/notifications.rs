//! Notification feed routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::Notification;
use persistence::repositories::NotificationRepository;

/// Feed response: the entries plus the unread count the client badges.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFeed {
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
}

/// Mark-all-read response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadResponse {
    pub updated: u64,
}

/// GET /notifications/:id (user id)
///
/// Newest-first feed, the poll target for the client's five-second timer.
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<NotificationFeed>, ApiError> {
    let repo = NotificationRepository::new(state.pool.clone());
    let notifications = repo
        .list_for_user(user_id)
        .await?
        .into_iter()
        .map(Notification::from)
        .collect();
    let unread_count = repo.unread_count(user_id).await?;

    Ok(Json(NotificationFeed {
        notifications,
        unread_count,
    }))
}

/// PATCH /notifications/:id/read (user id)
///
/// Marks the whole feed read. Idempotent: a second call updates nothing.
pub async fn mark_all_read(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let repo = NotificationRepository::new(state.pool.clone());
    let updated = repo.mark_all_read(user_id).await?;
    Ok(Json(MarkReadResponse { updated }))
}

/// DELETE /notifications/:id (notification id)
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = NotificationRepository::new(state.pool.clone());
    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Notification not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::models::NotificationKind;

    #[test]
    fn test_feed_serializes_unread_count() {
        let feed = NotificationFeed {
            notifications: vec![Notification {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                kind: NotificationKind::Confirmed,
                message: "Your booking for Ganesh Puja has been confirmed".to_string(),
                is_read: false,
                created_at: Utc::now(),
            }],
            unread_count: 1,
        };
        let json = serde_json::to_value(&feed).unwrap();
        assert_eq!(json["unreadCount"], 1);
        assert_eq!(json["notifications"][0]["kind"], "CONFIRMED");
    }
}
