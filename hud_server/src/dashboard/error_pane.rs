//! Error pane: one list item per failed build, or a fixed empty state.

use leptos::prelude::*;

use crate::services::error_service::ErrorList;

pub const NO_ERRORS: &str = "No errors";

/// Render the pane to HTML.
pub fn render(errors: &ErrorList) -> String {
    match errors {
        ErrorList::Empty => view! { <p>{NO_ERRORS}</p> }.to_html(),
        ErrorList::Entries(entries) => {
            let rows = entries
                .iter()
                .map(|entry| {
                    let key = entry.key.clone();
                    let log = entry.log.clone();
                    view! { <li data-key=key>{log}</li> }
                })
                .collect_view();
            view! { <ul>{rows}</ul> }.to_html()
        }
    }
}
