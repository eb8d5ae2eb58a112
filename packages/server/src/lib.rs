//! Real-time presence and synchronization server for live presentation viewing.
//!
//! Tracks which participants are in which presentation session, where each of
//! them is (slide index, status, follow mode), and relays navigation,
//! annotation, and presence events between them over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
