//! WebSocket handler for the presence channel.
//!
//! One task pair per connection: a receive loop dispatching client events to
//! the use cases, and a push loop draining the connection's channel onto the
//! socket. Whichever loop ends first aborts the other, and the teardown path
//! then treats the connection as a disconnect.

use std::ops::ControlFlow;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::domain::{ConnectionId, PresenceError};
use crate::infrastructure::dto::websocket::{
    AnnotationCoordinates, ClientEvent, ParticipantDto, ServerEvent,
};
use crate::infrastructure::registry::Binding;
use crate::ui::state::AppState;
use crate::usecase::{JoinInput, RelayError};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    tracing::info!("WebSocket connection '{}' opened", connection_id);

    let (ws_sender, mut ws_receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel::<String>();
    let mut push_task = spawn_push_loop(connection_id, rx, ws_sender);

    let recv_state = state.clone();
    let recv_tx = tx.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket receive error on '{}': {}", connection_id, e);
                    break;
                }
            };
            match msg {
                Message::Text(text) => {
                    let flow =
                        dispatch_event(&recv_state, connection_id, &recv_tx, text.as_str()).await;
                    if flow.is_break() {
                        break;
                    }
                }
                Message::Close(_) => break,
                // axum answers pings at the protocol level
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut recv_task => push_task.abort(),
        _ = &mut push_task => recv_task.abort(),
    }

    // A transport close is a leave; an unjoined connection has no binding
    // and nothing to clean up.
    if let Some(binding) = state.registry.unregister(connection_id).await {
        handle_disconnect(&state, connection_id, binding).await;
    }
    tracing::info!("WebSocket connection '{}' closed", connection_id);
}

/// Drain the connection's push channel onto the socket.
fn spawn_push_loop(
    connection_id: ConnectionId,
    mut rx: UnboundedReceiver<String>,
    mut ws_sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if let Err(e) = ws_sender.send(Message::Text(payload.into())).await {
                tracing::warn!("Failed to push to connection '{}': {}", connection_id, e);
                break;
            }
        }
    })
}

/// Parse and route one inbound event. `Break` closes the connection.
async fn dispatch_event(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    tx: &UnboundedSender<String>,
    text: &str,
) -> ControlFlow<()> {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!("Malformed event on '{}': {}", connection_id, e);
            send_error(tx, "malformed event payload");
            return ControlFlow::Continue(());
        }
    };

    let event = match event {
        ClientEvent::JoinPresentation {
            presentation_id,
            session_id,
            display_name,
            is_presenter,
        } => {
            return handle_join(
                state,
                connection_id,
                tx,
                JoinInput {
                    presentation_id,
                    session_id,
                    display_name,
                    is_presenter,
                },
            )
            .await;
        }
        other => other,
    };

    // Everything after join acts as the connection's bound identity.
    let binding = match state.registry.resolve(connection_id).await {
        Ok(binding) => binding,
        Err(_) => {
            send_error(tx, "not joined; send join-presentation first");
            return ControlFlow::Continue(());
        }
    };

    match event {
        ClientEvent::JoinPresentation { .. } => unreachable!("handled above"),
        ClientEvent::UpdateSlide { slide_index } => {
            handle_update_slide(state, &binding, tx, slide_index).await;
        }
        ClientEvent::PresenterNavigate { slide_index } => {
            handle_presenter_navigate(state, &binding, tx, slide_index).await;
        }
        ClientEvent::ToggleFollowPresenter { is_following } => {
            handle_toggle_follow(state, &binding, tx, is_following).await;
        }
        ClientEvent::GetViewers => {
            handle_get_viewers(state, &binding, tx).await;
        }
        ClientEvent::PresenterAnnotation {
            annotation_type,
            coordinates,
            color,
        } => {
            handle_annotation(state, &binding, tx, annotation_type, coordinates, color).await;
        }
        ClientEvent::Heartbeat => {
            if let Err(e) = state
                .heartbeat_usecase
                .execute(&binding.session_id, &binding.participant_id)
                .await
            {
                tracing::debug!("Heartbeat failed on '{}': {}", connection_id, e);
            }
        }
    }
    ControlFlow::Continue(())
}

async fn handle_join(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    tx: &UnboundedSender<String>,
    input: JoinInput,
) -> ControlFlow<()> {
    if state.registry.resolve(connection_id).await.is_ok() {
        send_error(tx, "connection already joined a session");
        return ControlFlow::Continue(());
    }

    let outcome = match state
        .join_presentation_usecase
        .execute(input, tx.clone())
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            send_error(tx, e.to_string());
            return ControlFlow::Continue(());
        }
    };

    if let Err(e) = state
        .registry
        .register(
            connection_id,
            outcome.session_id.clone(),
            outcome.participant.id.clone(),
        )
        .await
    {
        tracing::error!("Failed to register connection '{}': {}", connection_id, e);
        send_error(tx, "internal registration error");
        return ControlFlow::Break(());
    }

    let joined = ServerEvent::JoinedPresentation {
        session_id: outcome.session_id.as_str().to_string(),
        participant_id: outcome.participant.id.as_str().to_string(),
        participants: outcome.participants.iter().map(ParticipantDto::from).collect(),
    };
    if tx.send(joined.to_json()).is_err() {
        return ControlFlow::Break(());
    }

    let payload = ServerEvent::ViewerJoined {
        participant: ParticipantDto::from(&outcome.participant),
    }
    .to_json();
    state
        .join_presentation_usecase
        .broadcast_viewer_joined(&outcome.session_id, &outcome.participant.id, &payload)
        .await;

    tracing::info!(
        "Participant '{}' ({}) joined session '{}'",
        outcome.participant.display_name,
        outcome.participant.id.as_str(),
        outcome.session_id.as_str()
    );
    ControlFlow::Continue(())
}

async fn handle_update_slide(
    state: &Arc<AppState>,
    binding: &Binding,
    tx: &UnboundedSender<String>,
    slide_index: i64,
) {
    match state
        .update_slide_usecase
        .execute(&binding.session_id, &binding.participant_id, slide_index)
        .await
    {
        Ok((slide_index, targets)) => {
            let payload = ServerEvent::ViewerSlideChanged {
                participant_id: binding.participant_id.as_str().to_string(),
                slide_index: slide_index.value(),
            }
            .to_json();
            state
                .update_slide_usecase
                .broadcast_slide_changed(targets, &payload)
                .await;
        }
        Err(e) => send_error(tx, relay_error_message(&e)),
    }
}

async fn handle_presenter_navigate(
    state: &Arc<AppState>,
    binding: &Binding,
    tx: &UnboundedSender<String>,
    slide_index: i64,
) {
    match state
        .presenter_navigate_usecase
        .execute(&binding.session_id, &binding.participant_id, slide_index)
        .await
    {
        Ok((slide_index, followers)) => {
            let payload = ServerEvent::PresenterNavigated {
                slide_index: slide_index.value(),
                presenter_id: binding.participant_id.as_str().to_string(),
            }
            .to_json();
            state
                .presenter_navigate_usecase
                .push_to_followers(followers, &payload)
                .await;
        }
        Err(e) => send_error(tx, relay_error_message(&e)),
    }
}

async fn handle_toggle_follow(
    state: &Arc<AppState>,
    binding: &Binding,
    tx: &UnboundedSender<String>,
    is_following: bool,
) {
    match state
        .toggle_follow_usecase
        .execute(&binding.session_id, &binding.participant_id, is_following)
        .await
    {
        Ok(is_following) => {
            let _ = tx.send(ServerEvent::FollowModeUpdated { is_following }.to_json());
        }
        Err(e) => send_error(tx, relay_error_message(&e)),
    }
}

async fn handle_get_viewers(state: &Arc<AppState>, binding: &Binding, tx: &UnboundedSender<String>) {
    match state.get_viewers_usecase.execute(&binding.session_id).await {
        Ok(viewers) => {
            let event = ServerEvent::ViewersList {
                viewers: viewers.iter().map(ParticipantDto::from).collect(),
            };
            let _ = tx.send(event.to_json());
        }
        Err(e) => send_error(tx, relay_error_message(&e)),
    }
}

async fn handle_annotation(
    state: &Arc<AppState>,
    binding: &Binding,
    tx: &UnboundedSender<String>,
    annotation_type: String,
    coordinates: AnnotationCoordinates,
    color: String,
) {
    match state
        .relay_annotation_usecase
        .execute(&binding.session_id, &binding.participant_id)
        .await
    {
        Ok(targets) => {
            let payload = ServerEvent::AnnotationReceived {
                annotation_type,
                coordinates,
                color,
            }
            .to_json();
            state
                .relay_annotation_usecase
                .broadcast_annotation(targets, &payload)
                .await;
        }
        Err(e) => send_error(tx, relay_error_message(&e)),
    }
}

async fn handle_disconnect(state: &Arc<AppState>, connection_id: ConnectionId, binding: Binding) {
    match state
        .disconnect_participant_usecase
        .execute(&binding.session_id, &binding.participant_id)
        .await
    {
        Ok(targets) => {
            let payload = ServerEvent::ViewerLeft {
                participant_id: binding.participant_id.as_str().to_string(),
            }
            .to_json();
            state
                .disconnect_participant_usecase
                .broadcast_viewer_left(targets, &payload)
                .await;
            tracing::info!(
                "Participant '{}' left session '{}'",
                binding.participant_id.as_str(),
                binding.session_id.as_str()
            );
        }
        Err(e) => {
            tracing::warn!(
                "Disconnect cleanup failed for connection '{}': {}",
                connection_id,
                e
            );
        }
    }
}

fn send_error(tx: &UnboundedSender<String>, message: impl Into<String>) {
    let _ = tx.send(ServerEvent::error(message).to_json());
}

/// A vanished session means the client holds stale identity; tell it to
/// start over.
fn relay_error_message(e: &RelayError) -> String {
    match e {
        RelayError::Presence(PresenceError::SessionNotFound(_)) => {
            format!("{}; rejoin with join-presentation", e)
        }
        _ => e.to_string(),
    }
}
