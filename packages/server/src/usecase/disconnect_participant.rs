//! UseCase: participant disconnection and session teardown.
//!
//! Marks the participant offline, unregisters its push channel, and tears
//! the session down once nobody is online. The analytics flush runs on a
//! detached task against the removed session state, after the presence
//! mutation; the relay path never waits on it.

use std::sync::Arc;

use dais_shared::time::Clock;

use crate::domain::{
    AnalyticsSink, EventPusher, ParticipantId, SessionId, SessionRepository, Timestamp,
};

use super::error::RelayError;

pub struct DisconnectParticipantUseCase {
    repository: Arc<dyn SessionRepository>,
    pusher: Arc<dyn EventPusher>,
    analytics: Arc<dyn AnalyticsSink>,
    clock: Arc<dyn Clock>,
}

impl DisconnectParticipantUseCase {
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

    /// Returns the participants to notify with `viewer-left`.
    pub async fn execute(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
    ) -> Result<Vec<ParticipantId>, RelayError> {
        let remaining_online = self.repository.leave(session_id, participant_id).await?;
        self.pusher.unregister_channel(participant_id).await;

        let notify_targets = self
            .repository
            .online_participant_ids(session_id, None)
            .await?;

        if remaining_online == 0 {
            if let Some(session) = self.repository.teardown(session_id).await {
                let analytics = self.analytics.clone();
                let at = Timestamp::new(self.clock.now_utc_millis());
                tokio::spawn(async move {
                    analytics.record_session_closed(session, at).await;
                });
            }
        }

        Ok(notify_targets)
    }

    pub async fn broadcast_viewer_left(&self, targets: Vec<ParticipantId>, payload: &str) {
        if let Err(e) = self.pusher.broadcast(targets, payload).await {
            tracing::warn!("Failed to broadcast viewer-left: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MockAnalyticsSink, Participant, ParticipantIdFactory, PresenceError, PresentationId, Role,
    };
    use crate::infrastructure::{
        analytics::LogAnalyticsSink, pusher::WebSocketEventPusher,
        repository::InMemorySessionRepository,
    };
    use dais_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn new_viewer(name: &str) -> Participant {
        Participant::new(
            ParticipantIdFactory::generate(),
            name.to_string(),
            Role::Viewer,
            Timestamp::new(1_000),
        )
    }

    fn create_usecase(
        repository: Arc<InMemorySessionRepository>,
    ) -> DisconnectParticipantUseCase {
        DisconnectParticipantUseCase::new(
            repository,
            Arc::new(WebSocketEventPusher::new()),
            Arc::new(LogAnalyticsSink::new()),
            Arc::new(FixedClock::new(5_000)),
        )
    }

    #[tokio::test]
    async fn test_disconnect_notifies_remaining_participants() {
        // given: two viewers
        let repository = Arc::new(InMemorySessionRepository::new());
        let (session_id, _) = repository
            .resolve_or_create(None, PresentationId::new(42), Timestamp::new(1_000))
            .await;
        let alice = new_viewer("alice");
        let bob = new_viewer("bob");
        let alice_id = alice.id.clone();
        let bob_id = bob.id.clone();
        repository.join(&session_id, alice).await.unwrap();
        repository.join(&session_id, bob).await.unwrap();
        let usecase = create_usecase(repository.clone());

        // when:
        let targets = usecase.execute(&session_id, &alice_id).await.unwrap();

        // then: bob is notified and alice is gone from presence
        assert_eq!(targets, vec![bob_id]);
        let online = repository.list_online(&session_id).await.unwrap();
        assert_eq!(online.len(), 1);
        // session survives while bob is online
        assert!(repository.get_session(&session_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_last_disconnect_tears_down_session() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let (session_id, _) = repository
            .resolve_or_create(None, PresentationId::new(42), Timestamp::new(1_000))
            .await;
        let alice = new_viewer("alice");
        let alice_id = alice.id.clone();
        repository.join(&session_id, alice).await.unwrap();
        let usecase = create_usecase(repository.clone());

        // when:
        let targets = usecase.execute(&session_id, &alice_id).await.unwrap();

        // then: nobody to notify and the session state is freed
        assert!(targets.is_empty());
        assert!(matches!(
            repository.get_session(&session_id).await,
            Err(PresenceError::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_teardown_flushes_session_analytics() {
        // given: a mock sink that signals when the close event lands
        let repository = Arc::new(InMemorySessionRepository::new());
        let (session_id, _) = repository
            .resolve_or_create(None, PresentationId::new(42), Timestamp::new(1_000))
            .await;
        let alice = new_viewer("alice");
        let alice_id = alice.id.clone();
        repository.join(&session_id, alice).await.unwrap();

        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        let mut analytics = MockAnalyticsSink::new();
        analytics
            .expect_record_session_closed()
            .times(1)
            .returning(move |session, _| {
                let _ = done_tx.send(session.participants().len());
            });

        let usecase = DisconnectParticipantUseCase::new(
            repository,
            Arc::new(WebSocketEventPusher::new()),
            Arc::new(analytics),
            Arc::new(FixedClock::new(5_000)),
        );

        // when:
        usecase.execute(&session_id, &alice_id).await.unwrap();

        // then: the detached flush saw the final state (offline record retained)
        assert_eq!(done_rx.recv().await, Some(1));
    }

    #[tokio::test]
    async fn test_disconnect_unknown_participant_fails() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let (session_id, _) = repository
            .resolve_or_create(None, PresentationId::new(42), Timestamp::new(1_000))
            .await;
        let usecase = create_usecase(repository);

        // when:
        let stranger = ParticipantIdFactory::generate();
        let result = usecase.execute(&session_id, &stranger).await;

        // then:
        assert!(matches!(
            result,
            Err(RelayError::Presence(PresenceError::ParticipantNotFound(_)))
        ));
    }
}
