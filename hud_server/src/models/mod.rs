//! HUD data models — resource state as pushed by the host.

pub mod build;
pub mod resource;
pub mod snapshot;
pub mod timestamp;
