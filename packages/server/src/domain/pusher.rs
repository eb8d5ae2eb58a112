//! Event pusher trait: delivery of serialized events to client channels.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ParticipantId, PushError};

/// Channel carrying serialized events to one client's transport task.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Interface for pushing outbound events to connected participants.
///
/// Channel creation happens in the UI layer when the WebSocket is accepted;
/// implementations only manage registered senders and deliver payloads.
/// Delivery is best-effort: broadcast tolerates individual send failures.
#[async_trait]
pub trait EventPusher: Send + Sync {
    async fn register_channel(&self, participant_id: ParticipantId, sender: PusherChannel);

    async fn unregister_channel(&self, participant_id: &ParticipantId);

    /// Push to a single participant; errors if no live channel exists.
    async fn push_to(&self, participant_id: &ParticipantId, payload: &str)
        -> Result<(), PushError>;

    /// Push to many participants, skipping unreachable ones.
    async fn broadcast(&self, targets: Vec<ParticipantId>, payload: &str)
        -> Result<(), PushError>;
}
