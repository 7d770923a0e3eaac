//! HUD services — pure derivations over pushed resource state.

pub mod error_service;
pub mod sidebar_service;
pub mod snapshot_service;
