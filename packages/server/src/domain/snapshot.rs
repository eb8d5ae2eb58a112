//! Viewer snapshot trait: the external database collaborator that supplies
//! the initial viewer list for a presentation.

use async_trait::async_trait;

use super::{PresentationId, SlideIndex};

/// One row of the external viewer snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSnapshot {
    pub display_name: String,
    pub last_slide_index: SlideIndex,
}

/// Source of the persisted viewer list used to seed a freshly created
/// session before live connections establish. Seeded records are reconciled
/// against joins by display name so participants are never duplicated.
#[async_trait]
pub trait ViewerSnapshotSource: Send + Sync {
    async fn get_session_viewers(&self, presentation_id: PresentationId) -> Vec<ViewerSnapshot>;
}
