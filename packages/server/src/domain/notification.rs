//! Notification entity for the general in-app alerting channel.
//!
//! Separate from the presentation layer: a typed, titled, severity-tagged
//! message targeted at a user or broadcast, delivered once over the active
//! connection and never re-delivered on reconnect.

use serde::{Deserialize, Serialize};

use super::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Delivery target of a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationTarget {
    User(String),
    Broadcast,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Application-defined type tag, e.g. "candidate-matched".
    pub kind: String,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub created_at: Timestamp,
}

impl Notification {
    pub fn new(
        kind: String,
        title: String,
        message: String,
        severity: Severity,
        created_at: Timestamp,
    ) -> Self {
        Self {
            kind,
            title,
            message,
            severity,
            created_at,
        }
    }
}
