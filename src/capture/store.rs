//! Session-scoped snapshot store

use std::collections::HashMap;

use crate::domain::{Display, DisplayId};

use super::adapter::CaptureAdapter;
use super::snapshot::Snapshot;

/// Exclusive owner of the session's snapshots, one per display.
///
/// Captures happen once, strictly before any overlay is shown; there is
/// no recapture path. All buffers are released together at session end.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: HashMap<DisplayId, Snapshot>,
    failures: Vec<(DisplayId, String)>,
}

impl SnapshotStore {
    /// Capture every display up front.
    ///
    /// A display whose capture fails is excluded (no overlay surface will
    /// be created for it); the failure is kept so a later commit attempt
    /// against it can be reported rather than cropping a missing buffer.
    pub fn capture_all(adapter: &dyn CaptureAdapter, displays: &[Display]) -> Self {
        let mut snapshots = HashMap::new();
        let mut failures = Vec::new();
        for display in displays {
            match adapter.capture_display(display) {
                Ok(snapshot) => {
                    snapshots.insert(display.id, snapshot);
                }
                Err(err) => {
                    log::warn!(
                        "excluding display {} from session, snapshot failed: {err}",
                        display.id
                    );
                    failures.push((display.id, err.to_string()));
                }
            }
        }
        Self {
            snapshots,
            failures,
        }
    }

    pub fn get(&self, id: DisplayId) -> Option<&Snapshot> {
        self.snapshots.get(&id)
    }

    pub fn contains(&self, id: DisplayId) -> bool {
        self.snapshots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Why a display has no snapshot, if its capture failed
    pub fn failure_reason(&self, id: DisplayId) -> Option<&str> {
        self.failures
            .iter()
            .find(|(failed, _)| *failed == id)
            .map(|(_, reason)| reason.as_str())
    }

    /// Drop every buffer. Called on all terminal session paths.
    pub fn release(&mut self) {
        if !self.snapshots.is_empty() {
            log::debug!("releasing {} snapshot(s)", self.snapshots.len());
        }
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::testing::FixtureAdapter;
    use crate::domain::Point;

    fn two_displays() -> Vec<Display> {
        vec![
            Display::new(1, Point::new(0.0, 0.0), (1920.0, 1080.0), 1.0),
            Display::new(2, Point::new(1920.0, 0.0), (1280.0, 800.0), 2.0),
        ]
    }

    #[test]
    fn test_capture_all_takes_one_snapshot_per_display() {
        let displays = two_displays();
        let adapter = FixtureAdapter::new(displays.clone());
        let store = SnapshotStore::capture_all(&adapter, &displays);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(DisplayId(2)).unwrap().width(), 2560);
    }

    #[test]
    fn test_failed_display_is_excluded_with_reason() {
        let displays = two_displays();
        let adapter = FixtureAdapter::new(displays.clone()).failing(DisplayId(1));
        let store = SnapshotStore::capture_all(&adapter, &displays);
        assert_eq!(store.len(), 1);
        assert!(!store.contains(DisplayId(1)));
        assert!(store.failure_reason(DisplayId(1)).is_some());
        assert!(store.failure_reason(DisplayId(2)).is_none());
    }

    #[test]
    fn test_release_drops_all_buffers() {
        let displays = two_displays();
        let adapter = FixtureAdapter::new(displays.clone());
        let mut store = SnapshotStore::capture_all(&adapter, &displays);
        store.release();
        assert!(store.is_empty());
        assert!(store.get(DisplayId(1)).is_none());
    }
}
