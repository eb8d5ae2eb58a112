//! Use case layer: one struct per relay operation, each depending only on
//! the domain traits.

mod disconnect_participant;
mod error;
mod get_viewers;
mod heartbeat;
mod join_presentation;
mod presence_sweep;
mod presenter_navigate;
mod push_notification;
mod relay_annotation;
mod session_queries;
mod toggle_follow;
mod update_slide;

pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{JoinError, RelayError};
pub use get_viewers::GetViewersUseCase;
pub use heartbeat::HeartbeatUseCase;
pub use join_presentation::{JoinInput, JoinOutcome, JoinPresentationUseCase};
pub use presence_sweep::PresenceSweepUseCase;
pub use presenter_navigate::PresenterNavigateUseCase;
pub use push_notification::PushNotificationUseCase;
pub use relay_annotation::RelayAnnotationUseCase;
pub use session_queries::SessionQueriesUseCase;
pub use toggle_follow::ToggleFollowUseCase;
pub use update_slide::UpdateSlideUseCase;
