//! Logging [`AnalyticsSink`]: emits viewing events as structured logs for an
//! external reporting pipeline to scrape.

use async_trait::async_trait;

use crate::domain::{AnalyticsSink, ParticipantId, Session, SessionId, SlideIndex, Timestamp};

#[derive(Default)]
pub struct LogAnalyticsSink;

impl LogAnalyticsSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnalyticsSink for LogAnalyticsSink {
    async fn record_slide_view(
        &self,
        session_id: SessionId,
        participant_id: ParticipantId,
        slide_index: SlideIndex,
        at: Timestamp,
    ) {
        tracing::info!(
            session_id = session_id.as_str(),
            participant_id = participant_id.as_str(),
            slide_index = slide_index.value(),
            at = at.value(),
            "slide view"
        );
    }

    async fn record_session_closed(&self, session: Session, at: Timestamp) {
        tracing::info!(
            session_id = session.id.as_str(),
            presentation_id = session.presentation_id.value(),
            participant_count = session.participants().len(),
            duration_millis = at.millis_since(session.created_at),
            "session closed"
        );
    }
}
