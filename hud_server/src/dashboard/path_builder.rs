//! Link construction for local and shared-room HUDs.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static ROOM_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/view/([^/]+)").unwrap());

/// Which per-resource pane a sidebar link opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceView {
    #[default]
    Log,
    Preview,
    Errors,
}

impl ResourceView {
    fn suffix(self) -> &'static str {
        match self {
            Self::Log => "",
            Self::Preview => "/preview",
            Self::Errors => "/errors",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathBuilder {
    host: String,
    room_id: Option<String>,
}

impl PathBuilder {
    /// `pathname` is the path the HUD is served under; `/view/{room_id}` marks a shared room.
    pub fn new(host: impl Into<String>, pathname: &str) -> Self {
        let room_id = ROOM_PATH_REGEX
            .captures(pathname)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());
        Self {
            host: host.into(),
            room_id,
        }
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    /// Websocket endpoint the HUD reads resource state from.
    pub fn data_url(&self) -> String {
        match &self.room_id {
            Some(room) => format!("ws://{}/join/{}", self.host, room),
            None => format!("ws://{}/ws/view", self.host),
        }
    }

    fn root(&self) -> String {
        match &self.room_id {
            Some(room) => format!("/view/{room}"),
            None => String::new(),
        }
    }

    pub fn path(&self, relative: &str) -> String {
        format!("{}{}", self.root(), relative)
    }

    /// Link for the "All resources" entry.
    pub fn all_path(&self, view: ResourceView) -> String {
        match view {
            ResourceView::Log => self.path("/"),
            other => self.path(other.suffix()),
        }
    }

    /// The name is percent-encoded as a single path segment.
    pub fn resource_path(&self, name: &str, view: ResourceView) -> String {
        self.path(&format!("/r/{}{}", urlencoding::encode(name), view.suffix()))
    }
}
