//! UseCase: a viewer toggling follow mode.

use std::sync::Arc;

use dais_shared::time::Clock;

use crate::domain::{ParticipantId, Role, SessionId, SessionRepository, Timestamp};

use super::error::RelayError;

pub struct ToggleFollowUseCase {
    repository: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl ToggleFollowUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Set the sender's follow flag. Returns the new value, echoed back to
    /// the sender as `follow-mode-updated`.
    pub async fn execute(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
        is_following: bool,
    ) -> Result<bool, RelayError> {
        let participant = self
            .repository
            .get_participant(session_id, participant_id)
            .await?;
        if participant.role != Role::Viewer {
            return Err(RelayError::NotViewer);
        }

        let now = Timestamp::new(self.clock.now_utc_millis());
        self.repository
            .set_follow_mode(session_id, participant_id, is_following, now)
            .await?;
        Ok(is_following)
    }
}
