//! WebSocket handler for the notification channel.
//!
//! A thin delivery pipe: the client identifies itself by `user_id` query
//! parameter, the connection's channel is registered with the hub, and the
//! loop then only drains pushed payloads. Inbound frames are ignored apart
//! from close.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::ui::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NotificationChannelParams {
    user_id: String,
}

pub async fn notification_channel_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<NotificationChannelParams>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    if params.user_id.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "user_id must not be empty").into_response();
    }
    ws.on_upgrade(move |socket| handle_socket(socket, state, params.user_id))
        .into_response()
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user_id: String) {
    tracing::info!("Notification channel opened for user '{}'", user_id);

    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let token = state.notification_hub.register(user_id.clone(), tx).await;

    let push_user = user_id.clone();
    let mut push_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if let Err(e) = ws_sender.send(Message::Text(payload.into())).await {
                tracing::warn!("Failed to push notification to '{}': {}", push_user, e);
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.next().await {
            match msg {
                Ok(Message::Close(_)) | Err(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut recv_task => push_task.abort(),
        _ = &mut push_task => recv_task.abort(),
    }

    // Token-guarded: a reconnect that replaced this channel keeps its own.
    state.notification_hub.unregister(&user_id, token).await;
    tracing::info!("Notification channel closed for user '{}'", user_id);
}
