//! Connection registry: binds each live transport connection to exactly one
//! (session, participant) pair for the duration of the connection.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, ParticipantId, RegistryError, SessionId};

/// The logical identity a connection is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
}

/// Registry of live connections.
///
/// Mutating the map is its only side effect; it never emits relay events.
/// Every inbound event handler resolves the caller's identity here before
/// acting, so a client can only ever act as itself.
#[derive(Default)]
pub struct ConnectionRegistry {
    bindings: Mutex<HashMap<ConnectionId, Binding>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a connection with a (session, participant) pair.
    pub async fn register(
        &self,
        connection_id: ConnectionId,
        session_id: SessionId,
        participant_id: ParticipantId,
    ) -> Result<(), RegistryError> {
        let mut bindings = self.bindings.lock().await;
        if bindings.contains_key(&connection_id) {
            return Err(RegistryError::DuplicateRegistration(
                connection_id.to_string(),
            ));
        }
        bindings.insert(
            connection_id,
            Binding {
                session_id,
                participant_id,
            },
        );
        Ok(())
    }

    /// Resolve a connection to its binding.
    pub async fn resolve(&self, connection_id: ConnectionId) -> Result<Binding, RegistryError> {
        let bindings = self.bindings.lock().await;
        bindings
            .get(&connection_id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(connection_id.to_string()))
    }

    /// Remove a connection's binding. Idempotent: unknown connections are a
    /// no-op, returning `None`.
    pub async fn unregister(&self, connection_id: ConnectionId) -> Option<Binding> {
        let mut bindings = self.bindings.lock().await;
        bindings.remove(&connection_id)
    }
}
