//! WebSocket support for catalog notifications.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use reelshelf_core::CatalogEvent;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::metrics::{WS_CONNECTIONS_ACTIVE, WS_CONNECTIONS_TOTAL, WS_LAG_EVENTS, WS_MESSAGES_SENT};
use crate::state::AppState;

/// Interval between heartbeats sent to idle clients.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// WebSocket message sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// A catalog is ready to be read.
    CatalogAvailable {
        titles: usize,
        decades: Vec<i32>,
        from_cache: bool,
    },
    /// A catalog load failed; nothing was stored.
    CatalogLoadFailed { kind: String, error: String },
    /// Server heartbeat (sent periodically to keep connection alive).
    Heartbeat { timestamp: i64 },
}

impl WsMessage {
    fn heartbeat() -> Self {
        WsMessage::Heartbeat {
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    fn type_label(&self) -> &'static str {
        match self {
            WsMessage::CatalogAvailable { .. } => "catalog_available",
            WsMessage::CatalogLoadFailed { .. } => "catalog_load_failed",
            WsMessage::Heartbeat { .. } => "heartbeat",
        }
    }
}

impl From<CatalogEvent> for WsMessage {
    fn from(event: CatalogEvent) -> Self {
        match event {
            CatalogEvent::Available {
                titles,
                decades,
                from_cache,
            } => WsMessage::CatalogAvailable {
                titles,
                decades,
                from_cache,
            },
            CatalogEvent::LoadFailed { kind, error } => {
                WsMessage::CatalogLoadFailed { kind, error }
            }
        }
    }
}

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle a single WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before anything else so no event is missed
    let mut rx = state.catalog().subscribe();

    WS_CONNECTIONS_TOTAL.inc();
    WS_CONNECTIONS_ACTIVE.inc();

    info!("WebSocket client connected");

    let send_task = tokio::spawn(async move {
        let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
        // The first tick completes immediately
        heartbeat.tick().await;

        loop {
            let msg = tokio::select! {
                result = rx.recv() => match result {
                    Ok(event) => WsMessage::from(event),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("WebSocket client lagged, skipped {} messages", n);
                        WS_LAG_EVENTS.inc();
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Catalog event channel closed");
                        break;
                    }
                },
                _ = heartbeat.tick() => WsMessage::heartbeat(),
            };

            WS_MESSAGES_SENT.with_label_values(&[msg.type_label()]).inc();

            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        debug!("WebSocket send failed, client disconnected");
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to serialize WsMessage: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from client (ping/pong, close)
    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Close(_)) => {
                debug!("WebSocket client requested close");
                break;
            }
            Ok(Message::Text(text)) => {
                debug!("Received text message: {}", text);
            }
            Ok(_) => {}
            Err(e) => {
                warn!("WebSocket receive error: {}", e);
                break;
            }
        }
    }

    send_task.abort();
    WS_CONNECTIONS_ACTIVE.dec();
    info!("WebSocket client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_event_maps_to_ws_message() {
        let msg = WsMessage::from(CatalogEvent::Available {
            titles: 3,
            decades: vec![1980, 2000],
            from_cache: false,
        });

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "catalog_available");
        assert_eq!(json["titles"], 3);
        assert_eq!(json["decades"], serde_json::json!([1980, 2000]));
        assert_eq!(json["from_cache"], false);
    }

    #[test]
    fn test_load_failed_maps_to_ws_message() {
        let msg = WsMessage::from(CatalogEvent::LoadFailed {
            kind: "detail".to_string(),
            error: "boom".to_string(),
        });
        assert_eq!(msg.type_label(), "catalog_load_failed");

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "catalog_load_failed");
        assert_eq!(json["kind"], "detail");
    }

    #[test]
    fn test_heartbeat_has_timestamp() {
        let before = chrono::Utc::now().timestamp();
        let msg = WsMessage::heartbeat();
        let after = chrono::Utc::now().timestamp();

        match &msg {
            WsMessage::Heartbeat { timestamp } => {
                assert!(*timestamp >= before && *timestamp <= after)
            }
            other => panic!("Expected heartbeat, got {:?}", other),
        }

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "heartbeat");
        assert!(json["timestamp"].is_i64());
    }
}
