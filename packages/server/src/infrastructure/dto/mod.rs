//! Data Transfer Objects, organized by protocol:
//! - `websocket`: the closed event protocol spoken over the live channel
//! - `http`: HTTP API request/response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
