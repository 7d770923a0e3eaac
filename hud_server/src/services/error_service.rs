//! Build error aggregation across resources for the error pane.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::resource::Resource;

static ANSI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap());

const MAX_TITLE_CHARS: usize = 200;

/// One failed build, as shown in the error pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    /// Resource name followed by the build's index in its history.
    pub key: String,
    pub resource_name: String,
    pub build_index: usize,
    pub log: String,
    pub title: String,
}

/// Aggregated errors. `Entries` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorList {
    Empty,
    Entries(Vec<ErrorEntry>),
}

impl ErrorList {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        match self {
            Self::Empty => &[],
            Self::Entries(entries) => entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }
}

/// Collect every errored build, in resource order then history order.
pub fn aggregate_errors(resources: &[Resource]) -> ErrorList {
    let entries: Vec<ErrorEntry> = resources
        .iter()
        .flat_map(|r| {
            r.build_history
                .iter()
                .enumerate()
                .filter(|(_, b)| b.has_error())
                .map(move |(i, b)| ErrorEntry {
                    key: format!("{}{}", r.name, i),
                    resource_name: r.name.clone(),
                    build_index: i,
                    log: b.log.clone(),
                    title: title(&b.log),
                })
        })
        .collect();

    if entries.is_empty() {
        ErrorList::Empty
    } else {
        ErrorList::Entries(entries)
    }
}

/// Remove terminal color escapes from build output.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_REGEX.replace_all(text, "")
}

/// First non-blank log line without color codes, capped at 200 characters.
pub fn title(log: &str) -> String {
    let clean = strip_ansi(log);
    let line = clean
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("Build failed");
    line.chars().take(MAX_TITLE_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::build::{Build, BuildError};

    fn failed(log: &str) -> Build {
        Build {
            log: log.to_string(),
            finish_time: "1,555,970,585,039".to_string(),
            error: Some(BuildError::default()),
            ..Build::default()
        }
    }

    fn ok(log: &str) -> Build {
        Build {
            log: log.to_string(),
            ..Build::default()
        }
    }

    fn resource(name: &str, history: Vec<Build>) -> Resource {
        Resource {
            name: name.to_string(),
            build_history: history,
            ..Resource::default()
        }
    }

    #[test]
    fn empty_histories_give_empty_list() {
        let list = aggregate_errors(&[resource("foo", vec![]), resource("bar", vec![])]);
        assert_eq!(list, ErrorList::Empty);
        assert!(list.entries().is_empty());
    }

    #[test]
    fn no_resources_give_empty_list() {
        assert!(aggregate_errors(&[]).is_empty());
    }

    #[test]
    fn successful_builds_are_skipped() {
        let list = aggregate_errors(&[resource("foo", vec![ok("all good"), ok("fine")])]);
        assert!(list.is_empty());
    }

    #[test]
    fn single_error_carries_its_log() {
        let list = aggregate_errors(&[resource("foo", vec![failed("laa dee daa I'm an error")])]);
        assert_eq!(list.len(), 1);
        let entry = &list.entries()[0];
        assert_eq!(entry.log, "laa dee daa I'm an error");
        assert_eq!(entry.resource_name, "foo");
        assert_eq!(entry.key, "foo0");
    }

    #[test]
    fn two_errors_keep_history_order() {
        let list = aggregate_errors(&[resource(
            "foo",
            vec![
                failed("laa dee daa I'm an error"),
                failed("laa dee daa I'm another error"),
            ],
        )]);
        let logs: Vec<&str> = list.entries().iter().map(|e| e.log.as_str()).collect();
        assert_eq!(
            logs,
            vec!["laa dee daa I'm an error", "laa dee daa I'm another error"]
        );
        assert_eq!(list.entries()[1].key, "foo1");
    }

    #[test]
    fn resource_order_then_history_order_without_dedup() {
        let list = aggregate_errors(&[
            resource("b", vec![ok("fine"), failed("same")]),
            resource("a", vec![failed("same"), failed("same")]),
        ]);
        let keys: Vec<&str> = list.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["b1", "a0", "a1"]);
    }

    #[test]
    fn title_strips_color_and_blank_lines() {
        let log = "\n  \n\x1b[31mERROR\x1b[0m: cannot find module\nmore";
        assert_eq!(title(log), "ERROR: cannot find module");
        assert_eq!(title(""), "Build failed");
    }

    #[test]
    fn title_is_capped() {
        let long = "x".repeat(500);
        assert_eq!(title(&long).chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn entry_log_is_not_cleaned() {
        let log = "\x1b[31mboom\x1b[0m";
        let list = aggregate_errors(&[resource("foo", vec![failed(log)])]);
        assert_eq!(list.entries()[0].log, log);
        assert_eq!(list.entries()[0].title, "boom");
    }

    #[test]
    fn unrelated_words_in_logs_do_not_change_entries() {
        let logs = [
            "pulling latest image\nexit status 1",
            "Step 3/5: RUN ./contest.sh\nexit status 1",
            "ErrImagePull: unexpected EOF",
        ];
        let list = aggregate_errors(&[resource("foo", logs.iter().map(|l| failed(l)).collect())]);
        let titles: Vec<&str> = list.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "pulling latest image",
                "Step 3/5: RUN ./contest.sh",
                "ErrImagePull: unexpected EOF"
            ]
        );
        let json = serde_json::to_value(&list.entries()[0]).unwrap();
        assert!(json.get("category").is_none());
        assert_eq!(json["resource_name"], "foo");
    }
}
