//! HUD server — error pane and resource sidebar for a developer dashboard.
//!
//! The host pushes a snapshot of its resources (build history, warnings,
//! deploy times). This crate classifies and aggregates that snapshot with
//! pure functions and serves the results as JSON and rendered views.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod services;
