//! WebSocket-backed [`EventPusher`] implementation.
//!
//! The UI layer accepts the WebSocket and creates the per-client channel;
//! this implementation only manages registered senders and delivers
//! serialized events through them. Delivery is best-effort: a momentarily
//! unreachable recipient is skipped and re-syncs via `get-viewers`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{EventPusher, ParticipantId, PushError, PusherChannel};

/// WebSocket [`EventPusher`], keyed by participant id.
#[derive(Default)]
pub struct WebSocketEventPusher {
    channels: Mutex<HashMap<ParticipantId, PusherChannel>>,
}

impl WebSocketEventPusher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventPusher for WebSocketEventPusher {
    async fn register_channel(&self, participant_id: ParticipantId, sender: PusherChannel) {
        let mut channels = self.channels.lock().await;
        tracing::debug!(
            "Channel registered for participant '{}'",
            participant_id.as_str()
        );
        channels.insert(participant_id, sender);
    }

    async fn unregister_channel(&self, participant_id: &ParticipantId) {
        let mut channels = self.channels.lock().await;
        channels.remove(participant_id);
        tracing::debug!(
            "Channel unregistered for participant '{}'",
            participant_id.as_str()
        );
    }

    async fn push_to(
        &self,
        participant_id: &ParticipantId,
        payload: &str,
    ) -> Result<(), PushError> {
        let channels = self.channels.lock().await;
        let sender = channels
            .get(participant_id)
            .ok_or_else(|| PushError::ChannelNotFound(participant_id.as_str().to_string()))?;
        sender
            .send(payload.to_string())
            .map_err(|e| PushError::PushFailed(e.to_string()))
    }

    async fn broadcast(
        &self,
        targets: Vec<ParticipantId>,
        payload: &str,
    ) -> Result<(), PushError> {
        let channels = self.channels.lock().await;
        for target in targets {
            match channels.get(&target) {
                Some(sender) => {
                    if let Err(e) = sender.send(payload.to_string()) {
                        tracing::warn!(
                            "Failed to push event to participant '{}': {}",
                            target.as_str(),
                            e
                        );
                    }
                }
                None => {
                    tracing::warn!(
                        "Participant '{}' has no live channel, skipping",
                        target.as_str()
                    );
                }
            }
        }
        Ok(())
    }
}
