//! Viewer snapshot sources.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{PresentationId, ViewerSnapshot, ViewerSnapshotSource};

/// Snapshot source that knows nothing; every session starts empty.
///
/// Stands in for the external database collaborator when the server runs
/// standalone.
#[derive(Default)]
pub struct EmptyViewerSnapshotSource;

impl EmptyViewerSnapshotSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ViewerSnapshotSource for EmptyViewerSnapshotSource {
    async fn get_session_viewers(&self, _presentation_id: PresentationId) -> Vec<ViewerSnapshot> {
        Vec::new()
    }
}

/// Snapshot source backed by a fixed in-memory table, used in tests and
/// demos to simulate the persisted viewer list.
#[derive(Default)]
pub struct StaticViewerSnapshotSource {
    rows: Mutex<Vec<(PresentationId, ViewerSnapshot)>>,
}

impl StaticViewerSnapshotSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, presentation_id: PresentationId, snapshot: ViewerSnapshot) {
        let mut rows = self.rows.lock().await;
        rows.push((presentation_id, snapshot));
    }
}

#[async_trait]
impl ViewerSnapshotSource for StaticViewerSnapshotSource {
    async fn get_session_viewers(&self, presentation_id: PresentationId) -> Vec<ViewerSnapshot> {
        let rows = self.rows.lock().await;
        rows.iter()
            .filter(|(id, _)| *id == presentation_id)
            .map(|(_, snapshot)| snapshot.clone())
            .collect()
    }
}
