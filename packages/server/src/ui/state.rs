//! Server state shared across handlers.

use std::sync::Arc;

use crate::infrastructure::{notification_hub::NotificationHub, registry::ConnectionRegistry};
use crate::usecase::{
    DisconnectParticipantUseCase, GetViewersUseCase, HeartbeatUseCase, JoinPresentationUseCase,
    PresenterNavigateUseCase, PushNotificationUseCase, RelayAnnotationUseCase,
    SessionQueriesUseCase, ToggleFollowUseCase, UpdateSlideUseCase,
};

/// Shared application state: the connection registry, the notification hub,
/// and one use case per relay operation.
pub struct AppState {
    pub registry: Arc<ConnectionRegistry>,
    pub notification_hub: Arc<NotificationHub>,
    pub join_presentation_usecase: Arc<JoinPresentationUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub update_slide_usecase: Arc<UpdateSlideUseCase>,
    pub presenter_navigate_usecase: Arc<PresenterNavigateUseCase>,
    pub toggle_follow_usecase: Arc<ToggleFollowUseCase>,
    pub get_viewers_usecase: Arc<GetViewersUseCase>,
    pub relay_annotation_usecase: Arc<RelayAnnotationUseCase>,
    pub heartbeat_usecase: Arc<HeartbeatUseCase>,
    pub push_notification_usecase: Arc<PushNotificationUseCase>,
    pub session_queries_usecase: Arc<SessionQueriesUseCase>,
}
