//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::Severity;

/// Summary of a live session for the sessions list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummaryDto {
    pub id: String,
    pub presentation_id: i64,
    pub online_count: usize,
    pub created_at: String,
}

/// Detailed participant view for the session detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDetailDto {
    pub participant_id: String,
    pub display_name: String,
    pub role: String,
    pub slide_index: u32,
    pub status: String,
    pub is_following: bool,
    pub joined_at: String,
    pub last_seen: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetailDto {
    pub id: String,
    pub presentation_id: i64,
    pub created_at: String,
    pub participants: Vec<ParticipantDetailDto>,
}

/// Request body for notification ingestion.
#[derive(Debug, Clone, Deserialize)]
pub struct PushNotificationRequest {
    /// Target user id; omitted means broadcast.
    #[serde(default)]
    pub user_id: Option<String>,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

/// Response body for notification ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushNotificationResponse {
    pub delivered: usize,
}
