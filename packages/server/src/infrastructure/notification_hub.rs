//! Notification hub: channels for the general in-app alerting namespace.
//!
//! One active connection per user; a reconnect replaces the previous
//! channel. Delivery is fire-and-forget: nothing is persisted or
//! re-delivered on reconnect.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::PusherChannel;

/// Token identifying one registration, so a closing connection only removes
/// itself and not a newer channel for the same user.
pub type RegistrationToken = u64;

#[derive(Default)]
pub struct NotificationHub {
    channels: Mutex<HashMap<String, (RegistrationToken, PusherChannel)>>,
    next_token: std::sync::atomic::AtomicU64,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the active channel for a user, replacing any previous one.
    pub async fn register(&self, user_id: String, sender: PusherChannel) -> RegistrationToken {
        let token = self
            .next_token
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let mut channels = self.channels.lock().await;
        if channels.insert(user_id.clone(), (token, sender)).is_some() {
            tracing::debug!("Replaced notification channel for user '{}'", user_id);
        }
        token
    }

    /// Remove a user's channel, but only if it still belongs to the caller's
    /// registration.
    pub async fn unregister(&self, user_id: &str, token: RegistrationToken) {
        let mut channels = self.channels.lock().await;
        if let Some((current, _)) = channels.get(user_id) {
            if *current == token {
                channels.remove(user_id);
            }
        }
    }

    /// Deliver a payload to one user. Returns `true` if a channel accepted it.
    pub async fn push_to_user(&self, user_id: &str, payload: &str) -> bool {
        let channels = self.channels.lock().await;
        match channels.get(user_id) {
            Some((_, sender)) => sender.send(payload.to_string()).is_ok(),
            None => false,
        }
    }

    /// Deliver a payload to every connected user. Returns the delivery count.
    pub async fn broadcast(&self, payload: &str) -> usize {
        let channels = self.channels.lock().await;
        let mut delivered = 0;
        for (user_id, (_, sender)) in channels.iter() {
            if sender.send(payload.to_string()).is_ok() {
                delivered += 1;
            } else {
                tracing::warn!("Notification channel for user '{}' is gone", user_id);
            }
        }
        delivered
    }
}
