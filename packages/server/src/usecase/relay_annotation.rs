//! UseCase: relaying presenter annotations.
//!
//! Pure relay; no presence state is mutated.

use std::sync::Arc;

use crate::domain::{EventPusher, ParticipantId, Role, SessionId, SessionRepository};

use super::error::RelayError;

pub struct RelayAnnotationUseCase {
    repository: Arc<dyn SessionRepository>,
    pusher: Arc<dyn EventPusher>,
}

impl RelayAnnotationUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { repository, pusher }
    }

    /// Authorize the annotation and return the relay targets (everyone
    /// online except the presenter).
    pub async fn execute(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
    ) -> Result<Vec<ParticipantId>, RelayError> {
        let participant = self
            .repository
            .get_participant(session_id, participant_id)
            .await?;
        if participant.role != Role::Presenter {
            return Err(RelayError::NotPresenter);
        }

        let targets = self
            .repository
            .online_participant_ids(session_id, Some(participant_id))
            .await?;
        Ok(targets)
    }

    pub async fn broadcast_annotation(&self, targets: Vec<ParticipantId>, payload: &str) {
        if let Err(e) = self.pusher.broadcast(targets, payload).await {
            tracing::warn!("Failed to broadcast annotation-received: {}", e);
        }
    }
}
