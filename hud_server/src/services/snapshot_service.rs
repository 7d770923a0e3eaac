//! Latest-snapshot store with per-revision derived views.

use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::models::snapshot::Snapshot;
use crate::services::error_service::{aggregate_errors, ErrorList};
use crate::services::sidebar_service::{classify_sidebar, SidebarItem};

/// One accepted snapshot and everything derived from it.
#[derive(Debug)]
pub struct SnapshotState {
    pub revision: u64,
    pub fingerprint: String,
    pub snapshot: Snapshot,
    pub errors: ErrorList,
    pub sidebar: Vec<SidebarItem>,
}

impl SnapshotState {
    fn derive(revision: u64, fingerprint: String, snapshot: Snapshot) -> Self {
        let errors = aggregate_errors(&snapshot.resources);
        let sidebar = classify_sidebar(&snapshot.resources);
        Self {
            revision,
            fingerprint,
            snapshot,
            errors,
            sidebar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplaceOutcome {
    pub revision: u64,
    pub fingerprint: String,
    pub changed: bool,
}

#[derive(Debug)]
pub struct SnapshotStore {
    current: Arc<SnapshotState>,
}

impl SnapshotStore {
    pub fn new() -> Result<Self> {
        let snapshot = Snapshot::default();
        let fingerprint = snapshot.fingerprint()?;
        Ok(Self {
            current: Arc::new(SnapshotState::derive(0, fingerprint, snapshot)),
        })
    }

    pub fn current(&self) -> Arc<SnapshotState> {
        Arc::clone(&self.current)
    }

    /// Accept a new snapshot. Identical content keeps the current revision and
    /// its derived views.
    pub fn replace(&mut self, snapshot: Snapshot) -> Result<ReplaceOutcome> {
        let fingerprint = snapshot.fingerprint()?;
        if fingerprint == self.current.fingerprint {
            crate::metrics::snapshot_received(false);
            tracing::debug!(
                revision = self.current.revision,
                %fingerprint,
                "Snapshot unchanged"
            );
            return Ok(ReplaceOutcome {
                revision: self.current.revision,
                fingerprint,
                changed: false,
            });
        }

        let revision = self.current.revision + 1;
        let state = SnapshotState::derive(revision, fingerprint.clone(), snapshot);

        crate::metrics::snapshot_received(true);
        crate::metrics::resources_tracked(state.snapshot.resources.len());
        crate::metrics::build_errors(state.errors.len());
        tracing::info!(
            revision,
            %fingerprint,
            resources = state.snapshot.resources.len(),
            errors = state.errors.len(),
            "Snapshot accepted"
        );

        self.current = Arc::new(state);
        Ok(ReplaceOutcome {
            revision,
            fingerprint,
            changed: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::build::{Build, BuildError};
    use crate::models::resource::Resource;

    fn snapshot(log: &str) -> Snapshot {
        Snapshot {
            resources: vec![Resource {
                name: "foo".to_string(),
                build_history: vec![Build {
                    log: log.to_string(),
                    error: Some(BuildError::default()),
                    ..Build::default()
                }],
                ..Resource::default()
            }],
        }
    }

    #[test]
    fn starts_empty_at_revision_zero() {
        let store = SnapshotStore::new().unwrap();
        let state = store.current();
        assert_eq!(state.revision, 0);
        assert!(state.errors.is_empty());
        assert!(state.sidebar.is_empty());
    }

    #[test]
    fn new_content_bumps_revision_and_derives_views() {
        let mut store = SnapshotStore::new().unwrap();
        let outcome = store.replace(snapshot("boom")).unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.revision, 1);

        let state = store.current();
        assert_eq!(state.errors.len(), 1);
        assert_eq!(state.sidebar.len(), 1);
        assert!(state.sidebar[0].has_error());
    }

    #[test]
    fn identical_content_keeps_revision_and_state() {
        let mut store = SnapshotStore::new().unwrap();
        store.replace(snapshot("boom")).unwrap();
        let before = store.current();

        let outcome = store.replace(snapshot("boom")).unwrap();
        assert!(!outcome.changed);
        assert_eq!(outcome.revision, 1);
        assert!(Arc::ptr_eq(&before, &store.current()));
    }

    #[test]
    fn held_state_survives_replacement() {
        let mut store = SnapshotStore::new().unwrap();
        store.replace(snapshot("first")).unwrap();
        let held = store.current();
        store.replace(snapshot("second")).unwrap();
        assert_eq!(held.errors.entries()[0].log, "first");
        assert_eq!(store.current().errors.entries()[0].log, "second");
    }
}
