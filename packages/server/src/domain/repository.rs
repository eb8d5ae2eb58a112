//! Repository trait for session presence state.
//!
//! The interface the use case layer depends on; the concrete in-memory
//! implementation lives in the infrastructure layer (dependency inversion).

use async_trait::async_trait;

use super::{
    Participant, ParticipantId, PresenceError, PresentationId, Session, SessionId, SlideIndex,
    Timestamp,
};

/// Data access interface for session lifecycle and presence state.
///
/// Owns the mapping from session id to presence state. All mutations go
/// through this trait; the event relay only ever reads via the query
/// operations.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Return the known session for `session_id`, or mint a new session
    /// bound to `presentation_id`. The boolean is `true` when a session was
    /// created.
    async fn resolve_or_create(
        &self,
        session_id: Option<SessionId>,
        presentation_id: PresentationId,
        now: Timestamp,
    ) -> (SessionId, bool);

    /// Add a participant; returns the full current participant list for the
    /// session, used to seed the joining client's view.
    async fn join(
        &self,
        session_id: &SessionId,
        participant: Participant,
    ) -> Result<Vec<Participant>, PresenceError>;

    /// Insert snapshot-seeded offline records into a session.
    async fn seed_participants(
        &self,
        session_id: &SessionId,
        participants: Vec<Participant>,
    ) -> Result<(), PresenceError>;

    /// Mark a participant `offline`; returns the number of participants
    /// still online (zero makes the session eligible for teardown).
    async fn leave(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
    ) -> Result<usize, PresenceError>;

    async fn update_slide(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
        slide_index: SlideIndex,
        now: Timestamp,
    ) -> Result<(), PresenceError>;

    /// Move the presenter and every online following viewer to
    /// `slide_index`; returns the follower ids to relay to.
    async fn presenter_navigate(
        &self,
        session_id: &SessionId,
        presenter_id: &ParticipantId,
        slide_index: SlideIndex,
        now: Timestamp,
    ) -> Result<Vec<ParticipantId>, PresenceError>;

    async fn set_follow_mode(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
        is_following: bool,
        now: Timestamp,
    ) -> Result<(), PresenceError>;

    /// Refresh a participant's liveness (heartbeat path).
    async fn touch(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
        now: Timestamp,
    ) -> Result<(), PresenceError>;

    async fn get_participant(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
    ) -> Result<Participant, PresenceError>;

    /// Online participants, sorted by participant id.
    async fn list_online(&self, session_id: &SessionId) -> Result<Vec<Participant>, PresenceError>;

    /// Broadcast target set: online participant ids, optionally excluding
    /// the sender.
    async fn online_participant_ids(
        &self,
        session_id: &SessionId,
        exclude: Option<&ParticipantId>,
    ) -> Result<Vec<ParticipantId>, PresenceError>;

    /// Transition stale `online` participants to `away` across all sessions;
    /// returns the (session, participant) pairs that transitioned.
    async fn mark_stale_away(
        &self,
        now: Timestamp,
        timeout_millis: i64,
    ) -> Vec<(SessionId, ParticipantId)>;

    /// Free all state for a session. Returns the removed session so durable
    /// analytics can be written out by the caller; state is not recoverable
    /// afterwards.
    async fn teardown(&self, session_id: &SessionId) -> Option<Session>;

    async fn get_sessions(&self) -> Vec<Session>;

    async fn get_session(&self, session_id: &SessionId) -> Result<Session, PresenceError>;
}
