//! UseCase: in-app notification delivery.
//!
//! Fire-and-forget: a notification is delivered once over the target's
//! active notification channel, or dropped if none is connected. Delivery
//! state is not persisted; the durable notification history, if any, lives
//! in an external store.

use std::sync::Arc;

use dais_shared::time::Clock;

use crate::domain::{Notification, NotificationTarget, Severity, Timestamp};
use crate::infrastructure::dto::websocket::{NotificationDto, ServerEvent};
use crate::infrastructure::notification_hub::NotificationHub;

pub struct PushNotificationUseCase {
    hub: Arc<NotificationHub>,
    clock: Arc<dyn Clock>,
}

impl PushNotificationUseCase {
    pub fn new(hub: Arc<NotificationHub>, clock: Arc<dyn Clock>) -> Self {
        Self { hub, clock }
    }

    /// Deliver a notification; returns how many channels accepted it.
    pub async fn execute(
        &self,
        target: NotificationTarget,
        kind: String,
        title: String,
        message: String,
        severity: Severity,
    ) -> usize {
        let notification = Notification::new(
            kind,
            title,
            message,
            severity,
            Timestamp::new(self.clock.now_utc_millis()),
        );
        let payload = ServerEvent::Notification {
            notification: NotificationDto::from(&notification),
        }
        .to_json();

        match target {
            NotificationTarget::User(user_id) => {
                if self.hub.push_to_user(&user_id, &payload).await {
                    1
                } else {
                    tracing::debug!("No active notification channel for user '{}'", user_id);
                    0
                }
            }
            NotificationTarget::Broadcast => self.hub.broadcast(&payload).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dais_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn create_usecase() -> (PushNotificationUseCase, Arc<NotificationHub>) {
        let hub = Arc::new(NotificationHub::new());
        let usecase = PushNotificationUseCase::new(hub.clone(), Arc::new(FixedClock::new(9_000)));
        (usecase, hub)
    }

    #[tokio::test]
    async fn test_targeted_notification_reaches_connected_user() {
        // given:
        let (usecase, hub) = create_usecase();
        let (tx, mut rx) = mpsc::unbounded_channel();
        hub.register("user-1".to_string(), tx).await;

        // when:
        let delivered = usecase
            .execute(
                NotificationTarget::User("user-1".to_string()),
                "candidate-matched".to_string(),
                "New match".to_string(),
                "A candidate matched your posting".to_string(),
                Severity::Info,
            )
            .await;

        // then: delivered once, as a tagged notification event
        assert_eq!(delivered, 1);
        let payload = rx.recv().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["type"], "notification");
        assert_eq!(value["notification"]["notification_type"], "candidate-matched");
        assert_eq!(value["notification"]["severity"], "info");
        assert_eq!(value["notification"]["created_at"], 9_000);
    }

    #[tokio::test]
    async fn test_notification_for_disconnected_user_is_dropped() {
        // given: nobody connected
        let (usecase, _hub) = create_usecase();

        // when:
        let delivered = usecase
            .execute(
                NotificationTarget::User("ghost".to_string()),
                "reminder".to_string(),
                "Hello".to_string(),
                "…".to_string(),
                Severity::Warning,
            )
            .await;

        // then: fire-and-forget, no queueing for reconnect
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_broadcast_counts_all_connected_users() {
        // given:
        let (usecase, hub) = create_usecase();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        hub.register("user-1".to_string(), tx1).await;
        hub.register("user-2".to_string(), tx2).await;

        // when:
        let delivered = usecase
            .execute(
                NotificationTarget::Broadcast,
                "maintenance".to_string(),
                "Downtime".to_string(),
                "Back in five minutes".to_string(),
                Severity::Warning,
            )
            .await;

        // then:
        assert_eq!(delivered, 2);
    }
}
