//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::domain::{NotificationTarget, SessionId};
use crate::infrastructure::dto::http::{
    PushNotificationRequest, PushNotificationResponse, SessionDetailDto, SessionSummaryDto,
};
use crate::ui::state::AppState;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// List live sessions as summaries.
pub async fn get_sessions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sessions = state.session_queries_usecase.get_sessions().await;
    let dtos: Vec<SessionSummaryDto> = sessions.iter().map(Into::into).collect();
    Json(dtos)
}

/// Full participant detail for one session.
pub async fn get_session_detail(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let session_id = match SessionId::new(session_id) {
        Ok(session_id) => session_id,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };
    match state.session_queries_usecase.get_session(&session_id).await {
        Ok(session) => Json(SessionDetailDto::from(&session)).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

/// Debug view: every live session with full participant detail.
pub async fn debug_sessions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sessions = state.session_queries_usecase.get_sessions().await;
    let dtos: Vec<SessionDetailDto> = sessions.iter().map(Into::into).collect();
    Json(dtos)
}

/// Ingest a notification and deliver it over the notification channel.
pub async fn push_notification(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PushNotificationRequest>,
) -> impl IntoResponse {
    let target = match request.user_id {
        Some(user_id) => NotificationTarget::User(user_id),
        None => NotificationTarget::Broadcast,
    };
    let delivered = state
        .push_notification_usecase
        .execute(
            target,
            request.notification_type,
            request.title,
            request.message,
            request.severity,
        )
        .await;
    Json(PushNotificationResponse { delivered })
}
