pub mod http;
pub mod notifications;
pub mod websocket;
