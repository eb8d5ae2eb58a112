//! UI layer: HTTP/WebSocket surface of the server.

pub mod handler;
mod server;
mod signal;
mod state;

pub use server::{build_router, Server};
pub use state::AppState;
