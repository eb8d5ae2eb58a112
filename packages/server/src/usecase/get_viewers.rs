//! UseCase: presence query, the client-driven resynchronization path.

use std::sync::Arc;

use crate::domain::{Participant, SessionId, SessionRepository};

use super::error::RelayError;

pub struct GetViewersUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl GetViewersUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Online participants of the session, sorted by participant id.
    pub async fn execute(&self, session_id: &SessionId) -> Result<Vec<Participant>, RelayError> {
        Ok(self.repository.list_online(session_id).await?)
    }
}
