//! UseCase: read-only session queries for the HTTP surface.

use std::sync::Arc;

use crate::domain::{PresenceError, Session, SessionId, SessionRepository};

pub struct SessionQueriesUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl SessionQueriesUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_sessions(&self) -> Vec<Session> {
        self.repository.get_sessions().await
    }

    pub async fn get_session(&self, session_id: &SessionId) -> Result<Session, PresenceError> {
        self.repository.get_session(session_id).await
    }
}
