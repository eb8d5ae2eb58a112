//! Domain layer: entities, value objects, errors, and the traits the
//! use case layer depends on (dependency inversion: infrastructure
//! implements these traits, the domain never depends on infrastructure).

mod analytics;
mod error;
mod ids;
mod notification;
mod participant;
mod pusher;
mod repository;
mod session;
mod snapshot;

pub use analytics::AnalyticsSink;
pub use error::{PresenceError, PushError, RegistryError};
pub use ids::{
    ConnectionId, ParticipantId, ParticipantIdFactory, PresentationId, SessionId, SessionIdFactory,
    Timestamp,
};
pub use notification::{Notification, NotificationTarget, Severity};
pub use participant::{Participant, PresenceStatus, Role, SlideIndex};
pub use pusher::{EventPusher, PusherChannel};
pub use repository::SessionRepository;
pub use session::Session;
pub use snapshot::{ViewerSnapshot, ViewerSnapshotSource};

#[cfg(test)]
pub use analytics::MockAnalyticsSink;
