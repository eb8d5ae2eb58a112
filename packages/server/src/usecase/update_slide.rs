//! UseCase: a viewer reporting its own slide position.

use std::sync::Arc;

use dais_shared::time::Clock;

use crate::domain::{
    AnalyticsSink, EventPusher, ParticipantId, Role, SessionId, SessionRepository, SlideIndex,
    Timestamp,
};

use super::error::RelayError;

pub struct UpdateSlideUseCase {
    repository: Arc<dyn SessionRepository>,
    pusher: Arc<dyn EventPusher>,
    analytics: Arc<dyn AnalyticsSink>,
    clock: Arc<dyn Clock>,
}

impl UpdateSlideUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        pusher: Arc<dyn EventPusher>,
        analytics: Arc<dyn AnalyticsSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            pusher,
            analytics,
            clock,
        }
    }

    /// Validate and apply a slide change. Returns the validated index and
    /// the relay targets (everyone online except the sender).
    ///
    /// The analytics write is dispatched on a detached task; the relay path
    /// never waits on it.
    pub async fn execute(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
        raw_slide_index: i64,
    ) -> Result<(SlideIndex, Vec<ParticipantId>), RelayError> {
        let participant = self
            .repository
            .get_participant(session_id, participant_id)
            .await?;
        if participant.role != Role::Viewer {
            return Err(RelayError::NotViewer);
        }

        let slide_index = SlideIndex::new(raw_slide_index)?;
        let now = Timestamp::new(self.clock.now_utc_millis());
        self.repository
            .update_slide(session_id, participant_id, slide_index, now)
            .await?;

        let analytics = self.analytics.clone();
        let session = session_id.clone();
        let participant = participant_id.clone();
        tokio::spawn(async move {
            analytics
                .record_slide_view(session, participant, slide_index, now)
                .await;
        });

        let targets = self
            .repository
            .online_participant_ids(session_id, Some(participant_id))
            .await?;
        Ok((slide_index, targets))
    }

    pub async fn broadcast_slide_changed(&self, targets: Vec<ParticipantId>, payload: &str) {
        if let Err(e) = self.pusher.broadcast(targets, payload).await {
            tracing::warn!("Failed to broadcast viewer-slide-changed: {}", e);
        }
    }
}
