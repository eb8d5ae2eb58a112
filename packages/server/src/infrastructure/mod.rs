//! Infrastructure layer: concrete implementations of the domain traits and
//! the DTOs spoken over the wire.

pub mod analytics;
pub mod dto;
pub mod notification_hub;
pub mod pusher;
pub mod registry;
pub mod repository;
pub mod snapshot;
