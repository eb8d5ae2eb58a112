//! UseCase: periodic away sweep.
//!
//! Heartbeats are advisory on their own; this sweep is what acts on their
//! absence, transitioning stale `online` participants to `away`. The next
//! event from the participant brings it back.

use std::sync::Arc;
use std::time::Duration;

use dais_shared::time::Clock;

use crate::domain::{ParticipantId, SessionId, SessionRepository, Timestamp};

pub struct PresenceSweepUseCase {
    repository: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
    away_timeout: Duration,
}

impl PresenceSweepUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        clock: Arc<dyn Clock>,
        away_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            clock,
            away_timeout,
        }
    }

    /// One sweep pass across all sessions; returns who transitioned to away.
    pub async fn sweep_once(&self) -> Vec<(SessionId, ParticipantId)> {
        let now = Timestamp::new(self.clock.now_utc_millis());
        let transitioned = self
            .repository
            .mark_stale_away(now, self.away_timeout.as_millis() as i64)
            .await;
        for (session_id, participant_id) in &transitioned {
            tracing::debug!(
                "Participant '{}' in session '{}' marked away",
                participant_id.as_str(),
                session_id.as_str()
            );
        }
        transitioned
    }

    /// Run the sweep forever at the given interval. Spawned as a background
    /// task by the server entry point.
    pub async fn run(&self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            self.sweep_once().await;
        }
    }
}
