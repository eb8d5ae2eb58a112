//! Participant entity and its value objects.

use serde::{Deserialize, Serialize};

use super::error::PresenceError;
use super::ids::{ParticipantId, Timestamp};

/// Role of a participant within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Presenter,
    Viewer,
}

/// Liveness status of a participant.
///
/// `online` participants appear in presence queries. `away` is entered when
/// heartbeats go stale and left on the participant's next event. `offline`
/// records are retained for late-arriving events rather than deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Away,
    Offline,
}

/// Non-negative slide position within a presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlideIndex(u32);

impl SlideIndex {
    /// Validate a client-supplied index. Negative values are rejected with
    /// [`PresenceError::InvalidSlideIndex`].
    pub fn new(value: i64) -> Result<Self, PresenceError> {
        if !(0..=i64::from(u32::MAX)).contains(&value) {
            return Err(PresenceError::InvalidSlideIndex(value));
        }
        Ok(Self(value as u32))
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// A single viewer or presenter attached to a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    pub role: Role,
    /// Only meaningful while status is `online`.
    pub slide_index: SlideIndex,
    pub status: PresenceStatus,
    /// Viewers only; whether presenter navigation drives this participant.
    pub is_following: bool,
    pub joined_at: Timestamp,
    pub last_seen: Timestamp,
}

impl Participant {
    /// Create a freshly joined participant: slide index 0, status `online`.
    /// Viewers start in follow mode; presenters never follow.
    pub fn new(id: ParticipantId, display_name: String, role: Role, joined_at: Timestamp) -> Self {
        Self {
            id,
            display_name,
            role,
            slide_index: SlideIndex::zero(),
            status: PresenceStatus::Online,
            is_following: role == Role::Viewer,
            joined_at,
            last_seen: joined_at,
        }
    }

    /// A participant record seeded from an external viewer snapshot before
    /// the real connection establishes. Offline until the viewer joins.
    pub fn seeded(
        id: ParticipantId,
        display_name: String,
        slide_index: SlideIndex,
        seeded_at: Timestamp,
    ) -> Self {
        Self {
            id,
            display_name,
            role: Role::Viewer,
            slide_index,
            status: PresenceStatus::Offline,
            is_following: false,
            joined_at: seeded_at,
            last_seen: seeded_at,
        }
    }

    pub fn is_online(&self) -> bool {
        self.status == PresenceStatus::Online
    }

    /// Refresh liveness: updates last-seen and clears an `away` status.
    pub fn touch(&mut self, now: Timestamp) {
        self.last_seen = now;
        if self.status == PresenceStatus::Away {
            self.status = PresenceStatus::Online;
        }
    }
}
