//! JSON and HTML payloads for the HUD API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::dashboard::path_builder::{PathBuilder, ResourceView};
use crate::dashboard::sidebar::{self, SidebarProps};
use crate::error::Result;
use crate::models::snapshot::Snapshot;
use crate::services::error_service::ErrorEntry;
use crate::services::sidebar_service::SidebarStatus;
use crate::services::snapshot_service::SnapshotState;

/// Parse a pushed snapshot body.
pub fn parse_snapshot(body: &[u8]) -> Result<Snapshot> {
    Ok(serde_json::from_slice(body)?)
}

/// JSON response for the error pane.
#[derive(Debug, Serialize)]
pub struct ErrorsJson {
    pub revision: u64,
    pub empty: bool,
    pub entries: Vec<ErrorEntry>,
}

pub fn errors_json(state: &SnapshotState) -> ErrorsJson {
    ErrorsJson {
        revision: state.revision,
        empty: state.errors.is_empty(),
        entries: state.errors.entries().to_vec(),
    }
}

/// Query parameters shared by the sidebar endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SidebarQuery {
    pub selected: Option<String>,
    pub view: Option<ResourceView>,
    pub closed: Option<bool>,
}

impl SidebarQuery {
    fn selected(&self) -> &str {
        self.selected.as_deref().unwrap_or_default()
    }

    fn view(&self) -> ResourceView {
        self.view.unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct SidebarItemJson {
    pub name: String,
    pub status: SidebarStatus,
    pub has_warnings: bool,
    pub has_error: bool,
    pub is_built: bool,
    pub is_building: bool,
    pub is_selected: bool,
    pub runtime_status: Option<String>,
    pub last_deploy_time: Option<DateTime<Utc>>,
    pub pending_build_since: Option<DateTime<Utc>>,
    pub link: String,
}

pub fn sidebar_json(
    state: &SnapshotState,
    path_builder: &PathBuilder,
    query: &SidebarQuery,
) -> Vec<SidebarItemJson> {
    state
        .sidebar
        .iter()
        .map(|item| SidebarItemJson {
            name: item.name().to_string(),
            status: item.status(),
            has_warnings: item.has_warnings(),
            has_error: item.has_error(),
            is_built: item.is_built(),
            is_building: item.is_building(),
            is_selected: item.is_selected(query.selected()),
            runtime_status: item.runtime_status().map(str::to_owned),
            last_deploy_time: item.last_deploy_time(),
            pending_build_since: item.pending_build_since(),
            link: path_builder.resource_path(item.name(), query.view()),
        })
        .collect()
}

pub fn sidebar_html(
    state: &SnapshotState,
    path_builder: &PathBuilder,
    query: &SidebarQuery,
    now: DateTime<Utc>,
) -> String {
    let props = SidebarProps {
        items: &state.sidebar,
        selected: query.selected(),
        is_closed: query.closed.unwrap_or(false),
        resource_view: query.view(),
        path_builder,
    };
    sidebar::render(&props, now)
}

/// Weak validator for a rendered body. Derived from the bytes sent, so it
/// changes whenever the relative times or query-driven markup do.
pub fn content_etag(body: &str) -> String {
    let hash = Sha256::digest(body.as_bytes());
    format!("W/\"{}\"", hex::encode(&hash[..16]))
}
