//! Sidebar of monitored resources.

use chrono::{DateTime, Utc};
use leptos::prelude::*;

use crate::models::timestamp::format_since;
use crate::services::sidebar_service::SidebarItem;

use super::path_builder::{PathBuilder, ResourceView};

const NOT_BUILT_TIME: &str = "—";

pub struct SidebarProps<'a> {
    pub items: &'a [SidebarItem],
    /// Name of the selected resource; empty selects "All".
    pub selected: &'a str,
    pub is_closed: bool,
    pub resource_view: ResourceView,
    pub path_builder: &'a PathBuilder,
}

/// Render the sidebar to HTML. `now` anchors the relative deploy times.
pub fn render(props: &SidebarProps<'_>, now: DateTime<Utc>) -> String {
    let nav_class = if props.is_closed {
        "Sidebar is-closed"
    } else {
        "Sidebar is-open"
    };
    let all_class = if props.selected.is_empty() {
        "resLink resLink--all is-selected"
    } else {
        "resLink resLink--all"
    };
    let all_href = props.path_builder.all_path(props.resource_view);
    let rows = props
        .items
        .iter()
        .map(|item| render_item(item, props, now))
        .collect_view();

    view! {
        <nav class=nav_class>
            <ul>
                <li>
                    <a class=all_class href=all_href>"All"</a>
                </li>
                {rows}
            </ul>
        </nav>
    }
    .to_html()
}

fn link_class(item: &SidebarItem, selected: &str) -> String {
    let mut classes = vec!["resLink"];
    classes.extend(item.status().css_class());
    if item.is_building() {
        classes.push("is-building");
    }
    if item.is_selected(selected) {
        classes.push("is-selected");
    }
    classes.join(" ")
}

fn render_item(item: &SidebarItem, props: &SidebarProps<'_>, now: DateTime<Utc>) -> impl IntoView {
    let class = link_class(item, props.selected);
    let href = props
        .path_builder
        .resource_path(item.name(), props.resource_view);
    let status = item.status().as_str();
    let name = item.name().to_string();
    let runtime = item.runtime_status().map(|runtime| {
        let runtime = runtime.to_string();
        view! { <span class="resLink-runtime">{runtime}</span> }
    });
    let time = match item.last_deploy_time() {
        Some(deployed) if item.is_built() => format_since(deployed, now),
        _ => NOT_BUILT_TIME.to_string(),
    };

    view! {
        <li>
            <a class=class href=href data-status=status>
                <span class="resLink-name">{name}</span>
                {runtime}
                <span class="resLink-time">{time}</span>
            </a>
        </li>
    }
}
