//! Shared utilities for the Dais live-presentation server.
//!
//! Holds the pieces both the server crate and its tests need: logging setup
//! and time utilities with a clock abstraction.

pub mod logger;
pub mod time;
