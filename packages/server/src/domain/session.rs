//! Session entity: the authoritative in-memory view of one live
//! presentation instance and the participants attached to it.

use serde::Serialize;

use super::error::PresenceError;
use super::ids::{ParticipantId, PresentationId, SessionId, Timestamp};
use super::participant::{Participant, PresenceStatus, Role, SlideIndex};

/// One live presentation instance hosting zero or more participants.
///
/// All mutations run under the repository's lock; the entity itself holds no
/// synchronization.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: SessionId,
    pub presentation_id: PresentationId,
    pub created_at: Timestamp,
    participants: Vec<Participant>,
}

impl Session {
    pub fn new(id: SessionId, presentation_id: PresentationId, created_at: Timestamp) -> Self {
        Self {
            id,
            presentation_id,
            created_at,
            participants: Vec::new(),
        }
    }

    /// Add a participant to the session.
    ///
    /// Enforces presenter exclusivity: a second `presenter` join is rejected
    /// while an online presenter is seated. If an offline record with the
    /// same display name exists (a seeded snapshot entry, or a participant
    /// that dropped and reconnected), that record is replaced so the
    /// participant list never holds duplicates.
    pub fn join(&mut self, participant: Participant) -> Result<(), PresenceError> {
        if self.participants.iter().any(|p| p.id == participant.id) {
            return Err(PresenceError::DuplicateParticipant(
                participant.id.as_str().to_string(),
            ));
        }
        if participant.role == Role::Presenter && self.online_presenter().is_some() {
            return Err(PresenceError::PresenterAlreadyPresent(
                self.id.as_str().to_string(),
            ));
        }
        self.participants
            .retain(|p| !(p.status == PresenceStatus::Offline && p.display_name == participant.display_name));
        self.participants.push(participant);
        Ok(())
    }

    /// Insert a snapshot-seeded offline record, skipping display names that
    /// are already present.
    pub fn seed(&mut self, participant: Participant) {
        if self
            .participants
            .iter()
            .any(|p| p.display_name == participant.display_name)
        {
            return;
        }
        self.participants.push(participant);
    }

    /// Mark a participant `offline`. The record is retained so late-arriving
    /// events can still resolve it.
    pub fn leave(&mut self, participant_id: &ParticipantId) -> Result<(), PresenceError> {
        let participant = self.participant_mut(participant_id)?;
        participant.status = PresenceStatus::Offline;
        Ok(())
    }

    pub fn update_slide(
        &mut self,
        participant_id: &ParticipantId,
        slide_index: SlideIndex,
        now: Timestamp,
    ) -> Result<(), PresenceError> {
        let participant = self.participant_mut(participant_id)?;
        participant.slide_index = slide_index;
        participant.touch(now);
        Ok(())
    }

    /// Apply a presenter navigation: moves the presenter's own record and
    /// auto-applies the new index to every online following viewer.
    ///
    /// Returns the ids of the viewers whose index was moved, i.e. the relay
    /// targets for `presenter-navigated`.
    pub fn apply_presenter_navigation(
        &mut self,
        presenter_id: &ParticipantId,
        slide_index: SlideIndex,
        now: Timestamp,
    ) -> Result<Vec<ParticipantId>, PresenceError> {
        self.update_slide(presenter_id, slide_index, now)?;

        let mut followers = Vec::new();
        for p in &mut self.participants {
            if p.role == Role::Viewer && p.is_online() && p.is_following {
                p.slide_index = slide_index;
                followers.push(p.id.clone());
            }
        }
        followers.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(followers)
    }

    pub fn set_follow_mode(
        &mut self,
        participant_id: &ParticipantId,
        is_following: bool,
        now: Timestamp,
    ) -> Result<(), PresenceError> {
        let participant = self.participant_mut(participant_id)?;
        participant.is_following = is_following;
        participant.touch(now);
        Ok(())
    }

    /// Refresh a participant's liveness (heartbeat path).
    pub fn touch(&mut self, participant_id: &ParticipantId, now: Timestamp) -> Result<(), PresenceError> {
        let participant = self.participant_mut(participant_id)?;
        participant.touch(now);
        Ok(())
    }

    pub fn participant(&self, participant_id: &ParticipantId) -> Result<&Participant, PresenceError> {
        self.participants
            .iter()
            .find(|p| &p.id == participant_id)
            .ok_or_else(|| PresenceError::ParticipantNotFound(participant_id.as_str().to_string()))
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Online participants, sorted by participant id for consistent ordering.
    pub fn list_online(&self) -> Vec<Participant> {
        let mut online: Vec<Participant> = self
            .participants
            .iter()
            .filter(|p| p.is_online())
            .cloned()
            .collect();
        online.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        online
    }

    pub fn online_count(&self) -> usize {
        self.participants.iter().filter(|p| p.is_online()).count()
    }

    pub fn online_presenter(&self) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.role == Role::Presenter && p.is_online())
    }

    /// Ids of online participants, optionally excluding one (the usual
    /// "everyone but the sender" broadcast target set).
    pub fn online_participant_ids(&self, exclude: Option<&ParticipantId>) -> Vec<ParticipantId> {
        let mut ids: Vec<ParticipantId> = self
            .participants
            .iter()
            .filter(|p| p.is_online() && Some(&p.id) != exclude)
            .map(|p| p.id.clone())
            .collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids
    }

    /// Transition `online` participants whose last-seen timestamp is older
    /// than `timeout_millis` to `away`. Returns the ids that transitioned.
    pub fn mark_stale_away(&mut self, now: Timestamp, timeout_millis: i64) -> Vec<ParticipantId> {
        let mut transitioned = Vec::new();
        for p in &mut self.participants {
            if p.status == PresenceStatus::Online && now.millis_since(p.last_seen) > timeout_millis
            {
                p.status = PresenceStatus::Away;
                transitioned.push(p.id.clone());
            }
        }
        transitioned
    }

    fn participant_mut(
        &mut self,
        participant_id: &ParticipantId,
    ) -> Result<&mut Participant, PresenceError> {
        self.participants
            .iter_mut()
            .find(|p| &p.id == participant_id)
            .ok_or_else(|| PresenceError::ParticipantNotFound(participant_id.as_str().to_string()))
    }
}
