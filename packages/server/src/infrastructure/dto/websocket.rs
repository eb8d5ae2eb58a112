//! WebSocket event protocol.
//!
//! Events are a closed set of tagged variants; the `type` field selects the
//! variant and field names are part of the wire contract. Unknown or
//! malformed shapes fail deserialization at the boundary and are answered
//! with an `error` event, never forwarded.

use serde::{Deserialize, Serialize};

use crate::domain::Severity;

/// Annotation coordinates in normalized slide space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationCoordinates {
    pub x: f64,
    pub y: f64,
}

/// Client-originated events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinPresentation {
        presentation_id: i64,
        #[serde(default)]
        session_id: Option<String>,
        display_name: String,
        #[serde(default)]
        is_presenter: bool,
    },
    UpdateSlide {
        slide_index: i64,
    },
    PresenterNavigate {
        slide_index: i64,
    },
    ToggleFollowPresenter {
        is_following: bool,
    },
    GetViewers,
    PresenterAnnotation {
        annotation_type: String,
        coordinates: AnnotationCoordinates,
        color: String,
    },
    Heartbeat,
}

/// Participant as seen by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub participant_id: String,
    pub display_name: String,
    pub role: String,
    pub slide_index: u32,
    pub status: String,
    pub is_following: bool,
}

/// Notification as seen by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationDto {
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub created_at: i64,
}

/// Server-originated events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    JoinedPresentation {
        session_id: String,
        participant_id: String,
        participants: Vec<ParticipantDto>,
    },
    ViewerJoined {
        participant: ParticipantDto,
    },
    ViewerSlideChanged {
        participant_id: String,
        slide_index: u32,
    },
    PresenterNavigated {
        slide_index: u32,
        presenter_id: String,
    },
    FollowModeUpdated {
        is_following: bool,
    },
    ViewersList {
        viewers: Vec<ParticipantDto>,
    },
    AnnotationReceived {
        annotation_type: String,
        coordinates: AnnotationCoordinates,
        color: String,
    },
    ViewerLeft {
        participant_id: String,
    },
    Notification {
        notification: NotificationDto,
    },
    Error {
        message: String,
    },
}

impl ServerEvent {
    /// Serialize for the wire. Event shapes are plain data; serialization
    /// cannot fail.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize server event: {}", e);
            r#"{"type":"error","message":"internal serialization error"}"#.to_string()
        })
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_tagged_by_kebab_case_type() {
        // given:
        let json = r#"{"type":"join-presentation","presentation_id":42,"display_name":"alice"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then: optional fields default
        assert_eq!(
            event,
            ClientEvent::JoinPresentation {
                presentation_id: 42,
                session_id: None,
                display_name: "alice".to_string(),
                is_presenter: false,
            }
        );
    }

    #[test]
    fn test_unit_events_parse_from_bare_type() {
        // given / when / then:
        assert_eq!(
            serde_json::from_str::<ClientEvent>(r#"{"type":"get-viewers"}"#).unwrap(),
            ClientEvent::GetViewers
        );
        assert_eq!(
            serde_json::from_str::<ClientEvent>(r#"{"type":"heartbeat"}"#).unwrap(),
            ClientEvent::Heartbeat
        );
    }

    #[test]
    fn test_unknown_event_type_is_rejected() {
        // given:
        let json = r#"{"type":"drop-table","payload":"x"}"#;

        // when:
        let result = serde_json::from_str::<ClientEvent>(json);

        // then:
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        // given: update-slide without slide_index
        let json = r#"{"type":"update-slide"}"#;

        // when / then:
        assert!(serde_json::from_str::<ClientEvent>(json).is_err());
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        // given:
        let json = r#"{"type":"update-slide","slide_index":"three"}"#;

        // when / then:
        assert!(serde_json::from_str::<ClientEvent>(json).is_err());
    }

    #[test]
    fn test_negative_slide_index_still_parses() {
        // given: negative indices are a domain rejection (InvalidSlideIndex),
        // not a parse error
        let json = r#"{"type":"update-slide","slide_index":-1}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then:
        assert_eq!(event, ClientEvent::UpdateSlide { slide_index: -1 });
    }

    #[test]
    fn test_server_event_serializes_with_type_tag() {
        // given:
        let event = ServerEvent::PresenterNavigated {
            slide_index: 3,
            presenter_id: "p-1".to_string(),
        };

        // when:
        let json = event.to_json();

        // then:
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "presenter-navigated");
        assert_eq!(value["slide_index"], 3);
        assert_eq!(value["presenter_id"], "p-1");
    }

    #[test]
    fn test_annotation_round_trips() {
        // given:
        let json = r##"{"type":"presenter-annotation","annotation_type":"pointer","coordinates":{"x":0.5,"y":0.25},"color":"#ff0000"}"##;

        // when:
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then:
        assert_eq!(
            event,
            ClientEvent::PresenterAnnotation {
                annotation_type: "pointer".to_string(),
                coordinates: AnnotationCoordinates { x: 0.5, y: 0.25 },
                color: "#ff0000".to_string(),
            }
        );
    }
}
