//! Domain model to DTO conversions.

use dais_shared::time::timestamp_to_rfc3339;

use crate::domain::{Notification, Participant, PresenceStatus, Role, Session};

use super::http::{ParticipantDetailDto, SessionDetailDto, SessionSummaryDto};
use super::websocket::{NotificationDto, ParticipantDto};

fn role_str(role: Role) -> &'static str {
    match role {
        Role::Presenter => "presenter",
        Role::Viewer => "viewer",
    }
}

fn status_str(status: PresenceStatus) -> &'static str {
    match status {
        PresenceStatus::Online => "online",
        PresenceStatus::Away => "away",
        PresenceStatus::Offline => "offline",
    }
}

impl From<&Participant> for ParticipantDto {
    fn from(p: &Participant) -> Self {
        Self {
            participant_id: p.id.as_str().to_string(),
            display_name: p.display_name.clone(),
            role: role_str(p.role).to_string(),
            slide_index: p.slide_index.value(),
            status: status_str(p.status).to_string(),
            is_following: p.is_following,
        }
    }
}

impl From<&Participant> for ParticipantDetailDto {
    fn from(p: &Participant) -> Self {
        Self {
            participant_id: p.id.as_str().to_string(),
            display_name: p.display_name.clone(),
            role: role_str(p.role).to_string(),
            slide_index: p.slide_index.value(),
            status: status_str(p.status).to_string(),
            is_following: p.is_following,
            joined_at: timestamp_to_rfc3339(p.joined_at.value()),
            last_seen: timestamp_to_rfc3339(p.last_seen.value()),
        }
    }
}

impl From<&Session> for SessionSummaryDto {
    fn from(s: &Session) -> Self {
        Self {
            id: s.id.as_str().to_string(),
            presentation_id: s.presentation_id.value(),
            online_count: s.online_count(),
            created_at: timestamp_to_rfc3339(s.created_at.value()),
        }
    }
}

impl From<&Session> for SessionDetailDto {
    fn from(s: &Session) -> Self {
        Self {
            id: s.id.as_str().to_string(),
            presentation_id: s.presentation_id.value(),
            created_at: timestamp_to_rfc3339(s.created_at.value()),
            participants: s.participants().iter().map(Into::into).collect(),
        }
    }
}

impl From<&Notification> for NotificationDto {
    fn from(n: &Notification) -> Self {
        Self {
            notification_type: n.kind.clone(),
            title: n.title.clone(),
            message: n.message.clone(),
            severity: n.severity,
            created_at: n.created_at.value(),
        }
    }
}

pub fn participants_to_dtos(participants: &[Participant]) -> Vec<ParticipantDto> {
    participants.iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParticipantIdFactory, Timestamp};

    #[test]
    fn test_participant_dto_carries_presence_fields() {
        // given:
        let participant = Participant::new(
            ParticipantIdFactory::generate(),
            "alice".to_string(),
            Role::Viewer,
            Timestamp::new(1000),
        );

        // when:
        let dto = ParticipantDto::from(&participant);

        // then:
        assert_eq!(dto.display_name, "alice");
        assert_eq!(dto.role, "viewer");
        assert_eq!(dto.status, "online");
        assert_eq!(dto.slide_index, 0);
        assert!(dto.is_following);
    }
}
