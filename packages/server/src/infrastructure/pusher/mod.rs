//! Event pusher implementations.

pub mod websocket;

pub use websocket::WebSocketEventPusher;
