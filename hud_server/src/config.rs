//! HUD configuration — loaded from environment variables.

use crate::error::{HudError, Result};

#[derive(Clone, Debug)]
pub struct HudConfig {
    /// Shared room this HUD is viewing, if any. Prefixes every link with `/view/{room_id}`.
    pub room_id: Option<String>,
    /// Largest accepted snapshot body in bytes.
    pub max_snapshot_bytes: usize,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Allowed CORS origin. Any origin when unset.
    pub cors_origin: Option<String>,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            room_id: None,
            max_snapshot_bytes: 8 * 1024 * 1024,
            request_timeout_secs: 30,
            cors_origin: None,
        }
    }
}

impl HudConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let room_id = std::env::var("HUD_ROOM_ID")
            .ok()
            .filter(|s| !s.is_empty());
        let max_snapshot_bytes = std::env::var("HUD_MAX_SNAPSHOT_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_snapshot_bytes);
        let request_timeout_secs = std::env::var("HUD_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);
        let cors_origin = std::env::var("HUD_CORS_ORIGIN")
            .ok()
            .filter(|s| !s.is_empty());

        let config = Self {
            room_id,
            max_snapshot_bytes,
            request_timeout_secs,
            cors_origin,
        };
        config.validate()?;

        if config.cors_origin.is_none() {
            tracing::warn!("HUD_CORS_ORIGIN not set -- allowing any origin");
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(room) = &self.room_id {
            if room.contains('/') || room.trim() != room {
                return Err(HudError::Config {
                    message: format!("HUD_ROOM_ID must be a single path segment, got '{room}'"),
                });
            }
        }
        if self.max_snapshot_bytes == 0 {
            return Err(HudError::Config {
                message: "HUD_MAX_SNAPSHOT_BYTES must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Request path the HUD is served under.
    pub fn pathname(&self) -> String {
        match &self.room_id {
            Some(room) => format!("/view/{room}"),
            None => "/".to_string(),
        }
    }
}
