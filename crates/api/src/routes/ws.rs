//! WebSocket push channel for booking status events.
//!
//! Clients connect with `GET /ws?userId=…` and receive
//! `{event: "booking_status", message, status}` frames whenever one of
//! their bookings changes status. The same dispatch that wrote the feed
//! row produced the frame, so a client that misses a frame still finds
//! the entry when it next polls the feed.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::Response,
};
use serde::Deserialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::app::AppState;
use crate::services::dispatch::BookingEvent;

/// Connection query: which user's events to stream.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsQuery {
    pub user_id: Uuid,
}

/// GET /ws?userId=…
pub async fn booking_events(
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    let events = state.events.subscribe();
    ws.on_upgrade(move |socket| stream_events(socket, events, query.user_id))
}

/// Pumps matching events to the socket until either side closes.
async fn stream_events(
    mut socket: WebSocket,
    mut events: broadcast::Receiver<BookingEvent>,
    user_id: Uuid,
) {
    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(event) if event.user_id == user_id => {
                        let frame = match serde_json::to_string(&event) {
                            Ok(frame) => frame,
                            Err(e) => {
                                tracing::error!("Failed to serialize booking event: {}", e);
                                continue;
                            }
                        };
                        if socket.send(Message::Text(frame)).await.is_err() {
                            break;
                        }
                    }
                    Ok(_) => {} // Addressed to someone else
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        // The feed still has the rows; the client catches
                        // up on its next poll
                        tracing::debug!(user_id = %user_id, missed, "WebSocket consumer lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            message = socket.recv() => {
                match message {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {} // Inbound frames are ignored
                }
            }
        }
    }
}
