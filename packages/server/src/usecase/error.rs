//! Use case error types.

use thiserror::Error;

use crate::domain::PresenceError;

/// Errors from the join path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinError {
    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error(transparent)]
    Presence(#[from] PresenceError),
}

/// Errors from post-join relay operations. All are answered with an `error`
/// event to the sender and never crash the relay.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    /// Role-restricted event from a viewer.
    #[error("only the presenter may send this event")]
    NotPresenter,

    /// Role-restricted event from the presenter.
    #[error("only viewers may send this event")]
    NotViewer,

    #[error(transparent)]
    Presence(#[from] PresenceError),
}
