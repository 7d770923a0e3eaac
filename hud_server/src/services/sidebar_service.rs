//! Per-resource status classification for the sidebar.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::resource::Resource;
use crate::models::timestamp::parse_time;

/// Summary state shown for a sidebar entry. Declared in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SidebarStatus {
    Error,
    Warning,
    NotBuilt,
    Healthy,
}

impl SidebarStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::NotBuilt => "not-built",
            Self::Healthy => "healthy",
        }
    }

    /// CSS class hooked by the sidebar link, if any.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Error => Some("has-error"),
            Self::Warning => Some("has-warnings"),
            Self::NotBuilt => Some("not-built"),
            Self::Healthy => None,
        }
    }
}

/// Classification of one resource, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    name: String,
    has_warnings: bool,
    has_error: bool,
    is_built: bool,
    is_building: bool,
    runtime_status: Option<String>,
    last_deploy_time: Option<DateTime<Utc>>,
    pending_build_since: Option<DateTime<Utc>>,
}

impl SidebarItem {
    pub fn new(resource: &Resource) -> Self {
        let latest = resource.latest_build();
        let last_deploy_time = parse_time(&resource.last_deploy_time);

        Self {
            name: resource.name.clone(),
            has_warnings: latest.is_some_and(|b| b.has_warnings()),
            has_error: latest.is_some_and(|b| b.has_error()),
            is_built: last_deploy_time.is_some(),
            is_building: resource
                .current_build
                .as_ref()
                .is_some_and(|b| parse_time(&b.start_time).is_some()),
            runtime_status: resource.runtime_status.clone(),
            last_deploy_time,
            pending_build_since: parse_time(&resource.pending_build_since),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_warnings(&self) -> bool {
        self.has_warnings
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn is_built(&self) -> bool {
        self.is_built
    }

    pub fn is_building(&self) -> bool {
        self.is_building
    }

    pub fn runtime_status(&self) -> Option<&str> {
        self.runtime_status.as_deref()
    }

    pub fn last_deploy_time(&self) -> Option<DateTime<Utc>> {
        self.last_deploy_time
    }

    pub fn pending_build_since(&self) -> Option<DateTime<Utc>> {
        self.pending_build_since
    }

    /// Error beats warning: an errored build's warnings are not surfaced.
    pub fn status(&self) -> SidebarStatus {
        if self.has_error {
            SidebarStatus::Error
        } else if self.has_warnings {
            SidebarStatus::Warning
        } else if !self.is_built {
            SidebarStatus::NotBuilt
        } else {
            SidebarStatus::Healthy
        }
    }

    pub fn selection_key(&self) -> &str {
        &self.name
    }

    pub fn is_selected(&self, selected: &str) -> bool {
        !selected.is_empty() && self.selection_key() == selected
    }
}

/// Classify every resource, keeping input order.
pub fn classify_sidebar(resources: &[Resource]) -> Vec<SidebarItem> {
    resources.iter().map(SidebarItem::new).collect()
}
