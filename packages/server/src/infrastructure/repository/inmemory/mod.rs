//! In-memory repository implementations backed by a HashMap.

mod session;

pub use session::InMemorySessionRepository;
