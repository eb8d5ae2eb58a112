//! Error taxonomy for the presence and relay core.
//!
//! All of these are handled inside the relay boundary; none may terminate
//! the process.

use thiserror::Error;

/// Errors raised by the connection registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A connection attempted to bind twice. Protocol error; the connection
    /// is logged and closed.
    #[error("connection '{0}' is already registered")]
    DuplicateRegistration(String),

    /// An event referenced a connection that was never registered, typically
    /// a stale client after session teardown.
    #[error("connection '{0}' is not registered")]
    NotFound(String),
}

/// Errors raised by presence-state mutations and queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresenceError {
    #[error("session '{0}' not found")]
    SessionNotFound(String),

    #[error("participant '{0}' not found in session")]
    ParticipantNotFound(String),

    #[error("participant '{0}' is already in the session")]
    DuplicateParticipant(String),

    /// The session already has an online presenter. Presenter exclusivity is
    /// enforced at join time.
    #[error("session '{0}' already has an online presenter")]
    PresenterAlreadyPresent(String),

    /// Negative slide indices are rejected and leave prior state unchanged.
    #[error("invalid slide index: {0}")]
    InvalidSlideIndex(i64),
}

/// Errors raised when pushing an event to a client channel.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("no live channel for participant '{0}'")]
    ChannelNotFound(String),

    #[error("failed to push event: {0}")]
    PushFailed(String),
}
