//! Dashboard views rendered from classified resource state.

pub mod error_pane;
pub mod memo;
pub mod path_builder;
pub mod sidebar;
