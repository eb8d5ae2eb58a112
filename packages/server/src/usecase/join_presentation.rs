//! UseCase: joining a presentation session.
//!
//! Resolves or creates the session, seeds it from the external viewer
//! snapshot on first creation, adds the participant to presence, and
//! registers the client's push channel.

use std::sync::Arc;

use dais_shared::time::Clock;

use crate::domain::{
    EventPusher, Participant, ParticipantId, ParticipantIdFactory, PresentationId, PusherChannel,
    Role, SessionId, SessionRepository, Timestamp, ViewerSnapshotSource,
};

use super::error::JoinError;

/// Fields of a validated `join-presentation` request.
#[derive(Debug, Clone)]
pub struct JoinInput {
    pub presentation_id: i64,
    pub session_id: Option<String>,
    pub display_name: String,
    pub is_presenter: bool,
}

/// Result of a successful join, used to answer the sender and to broadcast
/// `viewer-joined` to everyone else.
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub session_id: SessionId,
    pub participant: Participant,
    /// Full current participant list, seeding the joining client's view.
    pub participants: Vec<Participant>,
}

pub struct JoinPresentationUseCase {
    repository: Arc<dyn SessionRepository>,
    pusher: Arc<dyn EventPusher>,
    snapshot_source: Arc<dyn ViewerSnapshotSource>,
    clock: Arc<dyn Clock>,
}

impl JoinPresentationUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        pusher: Arc<dyn EventPusher>,
        snapshot_source: Arc<dyn ViewerSnapshotSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            pusher,
            snapshot_source,
            clock,
        }
    }

    pub async fn execute(
        &self,
        input: JoinInput,
        sender: PusherChannel,
    ) -> Result<JoinOutcome, JoinError> {
        if input.display_name.trim().is_empty() {
            return Err(JoinError::EmptyDisplayName);
        }

        let now = Timestamp::new(self.clock.now_utc_millis());
        let presentation_id = PresentationId::new(input.presentation_id);
        let requested_session = input
            .session_id
            .and_then(|raw| SessionId::new(raw).ok());

        let (session_id, created) = self
            .repository
            .resolve_or_create(requested_session, presentation_id, now)
            .await;

        if created {
            self.seed_from_snapshot(&session_id, presentation_id, now)
                .await?;
        }

        let role = if input.is_presenter {
            Role::Presenter
        } else {
            Role::Viewer
        };
        let participant = Participant::new(
            ParticipantIdFactory::generate(),
            input.display_name,
            role,
            now,
        );

        let participants = self
            .repository
            .join(&session_id, participant.clone())
            .await?;

        self.pusher
            .register_channel(participant.id.clone(), sender)
            .await;

        Ok(JoinOutcome {
            session_id,
            participant,
            participants,
        })
    }

    /// Reconcile the fresh session with the persisted viewer list. Seeded
    /// records are offline and matched by display name on join, so live
    /// participants are never duplicated.
    async fn seed_from_snapshot(
        &self,
        session_id: &SessionId,
        presentation_id: PresentationId,
        now: Timestamp,
    ) -> Result<(), JoinError> {
        let snapshots = self
            .snapshot_source
            .get_session_viewers(presentation_id)
            .await;
        if snapshots.is_empty() {
            return Ok(());
        }

        let seeded: Vec<Participant> = snapshots
            .into_iter()
            .map(|row| {
                Participant::seeded(
                    ParticipantIdFactory::generate(),
                    row.display_name,
                    row.last_slide_index,
                    now,
                )
            })
            .collect();
        self.repository
            .seed_participants(session_id, seeded)
            .await?;
        Ok(())
    }

    /// Broadcast `viewer-joined` to every other online participant.
    pub async fn broadcast_viewer_joined(
        &self,
        session_id: &SessionId,
        new_participant_id: &ParticipantId,
        payload: &str,
    ) {
        let targets = match self
            .repository
            .online_participant_ids(session_id, Some(new_participant_id))
            .await
        {
            Ok(targets) => targets,
            Err(e) => {
                tracing::warn!("Failed to resolve broadcast targets: {}", e);
                return;
            }
        };
        if let Err(e) = self.pusher.broadcast(targets, payload).await {
            tracing::warn!("Failed to broadcast viewer-joined: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PresenceError, SlideIndex, ViewerSnapshot};
    use crate::infrastructure::{
        pusher::WebSocketEventPusher,
        repository::InMemorySessionRepository,
        snapshot::{EmptyViewerSnapshotSource, StaticViewerSnapshotSource},
    };
    use dais_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn create_usecase() -> (JoinPresentationUseCase, Arc<InMemorySessionRepository>) {
        let repository = Arc::new(InMemorySessionRepository::new());
        let usecase = JoinPresentationUseCase::new(
            repository.clone(),
            Arc::new(WebSocketEventPusher::new()),
            Arc::new(EmptyViewerSnapshotSource::new()),
            Arc::new(FixedClock::new(1_000)),
        );
        (usecase, repository)
    }

    fn join_input(name: &str, is_presenter: bool, session_id: Option<String>) -> JoinInput {
        JoinInput {
            presentation_id: 42,
            session_id,
            display_name: name.to_string(),
            is_presenter,
        }
    }

    #[tokio::test]
    async fn test_first_join_creates_session_and_returns_own_record() {
        // given:
        let (usecase, _repository) = create_usecase();
        let (tx, _rx) = mpsc::unbounded_channel();

        // when:
        let outcome = usecase
            .execute(join_input("alice", false, None), tx)
            .await
            .unwrap();

        // then: the joining client sees itself at slide 0
        assert_eq!(outcome.participants.len(), 1);
        assert_eq!(outcome.participant.slide_index, SlideIndex::zero());
        assert_eq!(outcome.participant.display_name, "alice");
    }

    #[tokio::test]
    async fn test_second_join_reuses_session() {
        // given:
        let (usecase, _repository) = create_usecase();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let first = usecase
            .execute(join_input("alice", false, None), tx1)
            .await
            .unwrap();

        // when:
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let second = usecase
            .execute(
                join_input(
                    "bob",
                    false,
                    Some(first.session_id.as_str().to_string()),
                ),
                tx2,
            )
            .await
            .unwrap();

        // then:
        assert_eq!(second.session_id, first.session_id);
        assert_eq!(second.participants.len(), 2);
    }

    #[tokio::test]
    async fn test_second_presenter_is_rejected() {
        // given:
        let (usecase, _repository) = create_usecase();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let first = usecase
            .execute(join_input("host", true, None), tx1)
            .await
            .unwrap();

        // when:
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let result = usecase
            .execute(
                join_input(
                    "impostor",
                    true,
                    Some(first.session_id.as_str().to_string()),
                ),
                tx2,
            )
            .await;

        // then:
        assert!(matches!(
            result,
            Err(JoinError::Presence(PresenceError::PresenterAlreadyPresent(_)))
        ));
    }

    #[tokio::test]
    async fn test_empty_display_name_is_rejected() {
        // given:
        let (usecase, _repository) = create_usecase();
        let (tx, _rx) = mpsc::unbounded_channel();

        // when:
        let result = usecase.execute(join_input("  ", false, None), tx).await;

        // then:
        assert_eq!(result.unwrap_err(), JoinError::EmptyDisplayName);
    }

    #[tokio::test]
    async fn test_snapshot_seeds_session_without_duplicating_joiner() {
        // given: the persisted viewer list knows alice and bob
        let repository = Arc::new(InMemorySessionRepository::new());
        let snapshot_source = Arc::new(StaticViewerSnapshotSource::new());
        snapshot_source
            .insert(
                PresentationId::new(42),
                ViewerSnapshot {
                    display_name: "alice".to_string(),
                    last_slide_index: SlideIndex::new(5).unwrap(),
                },
            )
            .await;
        snapshot_source
            .insert(
                PresentationId::new(42),
                ViewerSnapshot {
                    display_name: "bob".to_string(),
                    last_slide_index: SlideIndex::new(2).unwrap(),
                },
            )
            .await;
        let usecase = JoinPresentationUseCase::new(
            repository.clone(),
            Arc::new(WebSocketEventPusher::new()),
            snapshot_source,
            Arc::new(FixedClock::new(1_000)),
        );

        // when: alice joins live
        let (tx, _rx) = mpsc::unbounded_channel();
        let outcome = usecase
            .execute(join_input("alice", false, None), tx)
            .await
            .unwrap();

        // then: alice appears once (live), bob stays a seeded offline record
        assert_eq!(outcome.participants.len(), 2);
        let alice_records: Vec<_> = outcome
            .participants
            .iter()
            .filter(|p| p.display_name == "alice")
            .collect();
        assert_eq!(alice_records.len(), 1);
        assert!(alice_records[0].is_online());

        // and only alice is online
        let online = repository.list_online(&outcome.session_id).await.unwrap();
        assert_eq!(online.len(), 1);
    }
}
