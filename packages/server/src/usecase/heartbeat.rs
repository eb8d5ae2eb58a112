//! UseCase: advisory liveness refresh.

use std::sync::Arc;

use dais_shared::time::Clock;

use crate::domain::{ParticipantId, SessionId, SessionRepository, Timestamp};

use super::error::RelayError;

pub struct HeartbeatUseCase {
    repository: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl HeartbeatUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Refresh the sender's last-seen timestamp; an `away` participant comes
    /// back `online`. No relay.
    pub async fn execute(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
    ) -> Result<(), RelayError> {
        let now = Timestamp::new(self.clock.now_utc_millis());
        self.repository.touch(session_id, participant_id, now).await?;
        Ok(())
    }
}
