//! UseCase: presenter navigation driving follow-mode viewers.

use std::sync::Arc;

use dais_shared::time::Clock;

use crate::domain::{
    AnalyticsSink, EventPusher, ParticipantId, Role, SessionId, SessionRepository, SlideIndex,
    Timestamp,
};

use super::error::RelayError;

pub struct PresenterNavigateUseCase {
    repository: Arc<dyn SessionRepository>,
    pusher: Arc<dyn EventPusher>,
    analytics: Arc<dyn AnalyticsSink>,
    clock: Arc<dyn Clock>,
}

impl PresenterNavigateUseCase {
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

    /// Validate and apply a presenter navigation. The presence write moves
    /// the presenter's record and every online following viewer in one step;
    /// the returned ids are the viewers to relay `presenter-navigated` to.
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
        if participant.role != Role::Presenter {
            return Err(RelayError::NotPresenter);
        }

        let slide_index = SlideIndex::new(raw_slide_index)?;
        let now = Timestamp::new(self.clock.now_utc_millis());
        let followers = self
            .repository
            .presenter_navigate(session_id, participant_id, slide_index, now)
            .await?;

        let analytics = self.analytics.clone();
        let session = session_id.clone();
        let presenter = participant_id.clone();
        tokio::spawn(async move {
            analytics
                .record_slide_view(session, presenter, slide_index, now)
                .await;
        });

        Ok((slide_index, followers))
    }

    pub async fn push_to_followers(&self, followers: Vec<ParticipantId>, payload: &str) {
        if let Err(e) = self.pusher.broadcast(followers, payload).await {
            tracing::warn!("Failed to broadcast presenter-navigated: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Participant, ParticipantIdFactory, PresentationId};
    use crate::infrastructure::{
        analytics::LogAnalyticsSink, pusher::WebSocketEventPusher,
        repository::InMemorySessionRepository,
    };
    use dais_shared::time::FixedClock;

    struct Fixture {
        repository: Arc<InMemorySessionRepository>,
        usecase: PresenterNavigateUseCase,
        session_id: SessionId,
        presenter: ParticipantId,
        follower: ParticipantId,
        independent: ParticipantId,
    }

    async fn create_fixture() -> Fixture {
        let repository = Arc::new(InMemorySessionRepository::new());
        let (session_id, _) = repository
            .resolve_or_create(None, PresentationId::new(42), Timestamp::new(1_000))
            .await;

        let join = |name: &str, role: Role| {
            Participant::new(
                ParticipantIdFactory::generate(),
                name.to_string(),
                role,
                Timestamp::new(1_000),
            )
        };
        let presenter = join("host", Role::Presenter);
        let follower = join("alice", Role::Viewer);
        let independent = join("bob", Role::Viewer);
        let (presenter_id, follower_id, independent_id) = (
            presenter.id.clone(),
            follower.id.clone(),
            independent.id.clone(),
        );
        repository.join(&session_id, presenter).await.unwrap();
        repository.join(&session_id, follower).await.unwrap();
        repository.join(&session_id, independent).await.unwrap();
        repository
            .set_follow_mode(&session_id, &independent_id, false, Timestamp::new(1_500))
            .await
            .unwrap();

        let usecase = PresenterNavigateUseCase::new(
            repository.clone(),
            Arc::new(WebSocketEventPusher::new()),
            Arc::new(LogAnalyticsSink::new()),
            Arc::new(FixedClock::new(2_000)),
        );
        Fixture {
            repository,
            usecase,
            session_id,
            presenter: presenter_id,
            follower: follower_id,
            independent: independent_id,
        }
    }

    #[tokio::test]
    async fn test_navigation_moves_presenter_and_followers() {
        // given:
        let f = create_fixture().await;

        // when: presenter navigates to slide 3
        let (slide_index, followers) = f
            .usecase
            .execute(&f.session_id, &f.presenter, 3)
            .await
            .unwrap();

        // then: exactly the following viewer is a relay target
        assert_eq!(slide_index.value(), 3);
        assert_eq!(followers, vec![f.follower.clone()]);

        // and the follower's recorded index moved with the presenter
        let follower = f
            .repository
            .get_participant(&f.session_id, &f.follower)
            .await
            .unwrap();
        assert_eq!(follower.slide_index.value(), 3);

        // and the non-following viewer stayed put
        let independent = f
            .repository
            .get_participant(&f.session_id, &f.independent)
            .await
            .unwrap();
        assert_eq!(independent.slide_index.value(), 0);
    }

    #[tokio::test]
    async fn test_viewer_may_not_navigate() {
        // given:
        let f = create_fixture().await;

        // when:
        let result = f.usecase.execute(&f.session_id, &f.follower, 3).await;

        // then: rejected with no relay and no state change
        assert_eq!(result.unwrap_err(), RelayError::NotPresenter);
        let presenter = f
            .repository
            .get_participant(&f.session_id, &f.presenter)
            .await
            .unwrap();
        assert_eq!(presenter.slide_index.value(), 0);
    }

    #[tokio::test]
    async fn test_negative_navigation_is_rejected() {
        // given:
        let f = create_fixture().await;

        // when:
        let result = f.usecase.execute(&f.session_id, &f.presenter, -1).await;

        // then:
        assert!(matches!(result, Err(RelayError::Presence(_))));
    }
}
