//! In-memory session repository.
//!
//! Holds every live session in a single map behind one async mutex. Each
//! inbound event is handled read-mutate-relay to completion under that lock,
//! which is what keeps presence updates free of interleaved read-modify-write
//! races without per-session locking.
//!
//! State is not persisted; a torn-down session is gone. Durable analytics
//! are written out by the caller before teardown.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Participant, ParticipantId, PresenceError, PresentationId, Session, SessionId,
    SessionIdFactory, SessionRepository, SlideIndex, Timestamp,
};

/// In-memory [`SessionRepository`] implementation.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn resolve_or_create(
        &self,
        session_id: Option<SessionId>,
        presentation_id: PresentationId,
        now: Timestamp,
    ) -> (SessionId, bool) {
        let mut sessions = self.sessions.lock().await;

        if let Some(id) = session_id {
            if sessions.contains_key(&id) {
                return (id, false);
            }
        }

        let id = SessionIdFactory::generate();
        sessions.insert(
            id.clone(),
            Session::new(id.clone(), presentation_id, now),
        );
        tracing::info!(
            "Session '{}' created for presentation {}",
            id.as_str(),
            presentation_id.value()
        );
        (id, true)
    }

    async fn join(
        &self,
        session_id: &SessionId,
        participant: Participant,
    ) -> Result<Vec<Participant>, PresenceError> {
        let mut sessions = self.sessions.lock().await;
        let session = get_mut(&mut sessions, session_id)?;
        session.join(participant)?;
        Ok(session.participants().to_vec())
    }

    async fn seed_participants(
        &self,
        session_id: &SessionId,
        participants: Vec<Participant>,
    ) -> Result<(), PresenceError> {
        let mut sessions = self.sessions.lock().await;
        let session = get_mut(&mut sessions, session_id)?;
        for participant in participants {
            session.seed(participant);
        }
        Ok(())
    }

    async fn leave(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
    ) -> Result<usize, PresenceError> {
        let mut sessions = self.sessions.lock().await;
        let session = get_mut(&mut sessions, session_id)?;
        session.leave(participant_id)?;
        Ok(session.online_count())
    }

    async fn update_slide(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
        slide_index: SlideIndex,
        now: Timestamp,
    ) -> Result<(), PresenceError> {
        let mut sessions = self.sessions.lock().await;
        let session = get_mut(&mut sessions, session_id)?;
        session.update_slide(participant_id, slide_index, now)
    }

    async fn presenter_navigate(
        &self,
        session_id: &SessionId,
        presenter_id: &ParticipantId,
        slide_index: SlideIndex,
        now: Timestamp,
    ) -> Result<Vec<ParticipantId>, PresenceError> {
        let mut sessions = self.sessions.lock().await;
        let session = get_mut(&mut sessions, session_id)?;
        session.apply_presenter_navigation(presenter_id, slide_index, now)
    }

    async fn set_follow_mode(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
        is_following: bool,
        now: Timestamp,
    ) -> Result<(), PresenceError> {
        let mut sessions = self.sessions.lock().await;
        let session = get_mut(&mut sessions, session_id)?;
        session.set_follow_mode(participant_id, is_following, now)
    }

    async fn touch(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
        now: Timestamp,
    ) -> Result<(), PresenceError> {
        let mut sessions = self.sessions.lock().await;
        let session = get_mut(&mut sessions, session_id)?;
        session.touch(participant_id, now)
    }

    async fn get_participant(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
    ) -> Result<Participant, PresenceError> {
        let sessions = self.sessions.lock().await;
        let session = get(&sessions, session_id)?;
        session.participant(participant_id).cloned()
    }

    async fn list_online(&self, session_id: &SessionId) -> Result<Vec<Participant>, PresenceError> {
        let sessions = self.sessions.lock().await;
        let session = get(&sessions, session_id)?;
        Ok(session.list_online())
    }

    async fn online_participant_ids(
        &self,
        session_id: &SessionId,
        exclude: Option<&ParticipantId>,
    ) -> Result<Vec<ParticipantId>, PresenceError> {
        let sessions = self.sessions.lock().await;
        let session = get(&sessions, session_id)?;
        Ok(session.online_participant_ids(exclude))
    }

    async fn mark_stale_away(
        &self,
        now: Timestamp,
        timeout_millis: i64,
    ) -> Vec<(SessionId, ParticipantId)> {
        let mut sessions = self.sessions.lock().await;
        let mut transitioned = Vec::new();
        for (session_id, session) in sessions.iter_mut() {
            for participant_id in session.mark_stale_away(now, timeout_millis) {
                transitioned.push((session_id.clone(), participant_id));
            }
        }
        transitioned
    }

    async fn teardown(&self, session_id: &SessionId) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.remove(session_id);
        if removed.is_some() {
            tracing::info!("Session '{}' torn down", session_id.as_str());
        }
        removed
    }

    async fn get_sessions(&self) -> Vec<Session> {
        let sessions = self.sessions.lock().await;
        let mut all: Vec<Session> = sessions.values().cloned().collect();
        all.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        all
    }

    async fn get_session(&self, session_id: &SessionId) -> Result<Session, PresenceError> {
        let sessions = self.sessions.lock().await;
        get(&sessions, session_id).cloned()
    }
}

fn get<'a>(
    sessions: &'a HashMap<SessionId, Session>,
    session_id: &SessionId,
) -> Result<&'a Session, PresenceError> {
    sessions
        .get(session_id)
        .ok_or_else(|| PresenceError::SessionNotFound(session_id.as_str().to_string()))
}

fn get_mut<'a>(
    sessions: &'a mut HashMap<SessionId, Session>,
    session_id: &SessionId,
) -> Result<&'a mut Session, PresenceError> {
    sessions
        .get_mut(session_id)
        .ok_or_else(|| PresenceError::SessionNotFound(session_id.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParticipantIdFactory, Role};

    fn new_viewer(name: &str) -> Participant {
        Participant::new(
            ParticipantIdFactory::generate(),
            name.to_string(),
            Role::Viewer,
            Timestamp::new(1000),
        )
    }

    async fn create_session(repo: &InMemorySessionRepository) -> SessionId {
        let (session_id, created) = repo
            .resolve_or_create(None, PresentationId::new(7), Timestamp::new(1000))
            .await;
        assert!(created);
        session_id
    }

    #[tokio::test]
    async fn test_resolve_or_create_returns_existing_session() {
        // given:
        let repo = InMemorySessionRepository::new();
        let session_id = create_session(&repo).await;

        // when:
        let (resolved, created) = repo
            .resolve_or_create(
                Some(session_id.clone()),
                PresentationId::new(7),
                Timestamp::new(2000),
            )
            .await;

        // then:
        assert_eq!(resolved, session_id);
        assert!(!created);
    }

    #[tokio::test]
    async fn test_resolve_or_create_mints_fresh_id_for_unknown_session() {
        // given:
        let repo = InMemorySessionRepository::new();
        let stale = SessionIdFactory::generate();

        // when: a stale id from a torn-down session is supplied
        let (resolved, created) = repo
            .resolve_or_create(Some(stale.clone()), PresentationId::new(7), Timestamp::new(1000))
            .await;

        // then: a new session is minted rather than resurrecting the old id
        assert_ne!(resolved, stale);
        assert!(created);
    }

    #[tokio::test]
    async fn test_join_returns_full_participant_list() {
        // given:
        let repo = InMemorySessionRepository::new();
        let session_id = create_session(&repo).await;
        repo.join(&session_id, new_viewer("alice")).await.unwrap();

        // when:
        let list = repo.join(&session_id, new_viewer("bob")).await.unwrap();

        // then:
        assert_eq!(list.len(), 2);
    }

    #[tokio::test]
    async fn test_join_unknown_session_fails() {
        // given:
        let repo = InMemorySessionRepository::new();
        let unknown = SessionIdFactory::generate();

        // when:
        let result = repo.join(&unknown, new_viewer("alice")).await;

        // then:
        assert!(matches!(result, Err(PresenceError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_leave_reports_remaining_online_count() {
        // given:
        let repo = InMemorySessionRepository::new();
        let session_id = create_session(&repo).await;
        let alice = new_viewer("alice");
        let alice_id = alice.id.clone();
        repo.join(&session_id, alice).await.unwrap();
        repo.join(&session_id, new_viewer("bob")).await.unwrap();

        // when:
        let remaining = repo.leave(&session_id, &alice_id).await.unwrap();

        // then:
        assert_eq!(remaining, 1);
        assert_eq!(repo.list_online(&session_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_teardown_frees_session_state() {
        // given:
        let repo = InMemorySessionRepository::new();
        let session_id = create_session(&repo).await;

        // when:
        let removed = repo.teardown(&session_id).await;

        // then:
        assert!(removed.is_some());
        assert!(repo.teardown(&session_id).await.is_none());
        assert!(matches!(
            repo.get_session(&session_id).await,
            Err(PresenceError::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_mark_stale_away_spans_sessions() {
        // given: two sessions, each with one stale participant
        let repo = InMemorySessionRepository::new();
        let s1 = create_session(&repo).await;
        let (s2, _) = repo
            .resolve_or_create(None, PresentationId::new(8), Timestamp::new(1000))
            .await;
        repo.join(&s1, new_viewer("alice")).await.unwrap();
        repo.join(&s2, new_viewer("bob")).await.unwrap();

        // when:
        let transitioned = repo.mark_stale_away(Timestamp::new(120_000), 60_000).await;

        // then:
        assert_eq!(transitioned.len(), 2);
        assert!(repo.list_online(&s1).await.unwrap().is_empty());
        assert!(repo.list_online(&s2).await.unwrap().is_empty());
    }
}
