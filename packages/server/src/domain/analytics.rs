//! Analytics sink trait: fire-and-forget persistence of viewing events.

use async_trait::async_trait;

use super::{ParticipantId, Session, SessionId, SlideIndex, Timestamp};

/// Sink for slide-view and session-close events consumed by an external
/// reporting service.
///
/// Calls are dispatched on detached tasks after the presence mutation and
/// relay; the relay path never awaits them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn record_slide_view(
        &self,
        session_id: SessionId,
        participant_id: ParticipantId,
        slide_index: SlideIndex,
        at: Timestamp,
    );

    /// Called with the final session state just before teardown frees it.
    async fn record_session_closed(&self, session: Session, at: Timestamp);
}
