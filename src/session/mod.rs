//! Capture session: one attempt at a drag-selection
//!
//! This module contains:
//! - Input/notification event types (messages.rs)
//! - The per-display overlay surface state machine (surface.rs)
//! - The session owner coordinating surfaces and snapshots

pub mod messages;
pub mod surface;

pub use messages::{InputEvent, KeyEvent, PointerEvent, SessionEvent};
pub use surface::{MIN_SELECTION_SIZE, OverlaySurface};

use crate::capture::adapter::CaptureAdapter;
use crate::capture::extract;
use crate::capture::store::SnapshotStore;
use crate::domain::{CaptureResult, Display, DisplayId, LogicalRect, Point};
use crate::error::CaptureError;

use surface::SurfaceReply;

/// One capture attempt: owns every overlay surface and the snapshot
/// store, and resolves exactly one outcome.
///
/// The session is single-threaded; the shell feeds it pointer and key
/// events tagged with the display they occurred on and forwards the
/// returned notifications to its collaborators.
pub struct SelectionSession {
    displays: Vec<Display>,
    store: SnapshotStore,
    surfaces: Vec<OverlaySurface>,
    focused: DisplayId,
    resolved: bool,
}

impl SelectionSession {
    /// Start a session: enumerate displays, wait for a clean screen,
    /// snapshot everything, then create one surface per captured display.
    ///
    /// Snapshots are taken strictly before any surface exists, so the
    /// overlays can never capture themselves; they are never refreshed,
    /// so the loupe and the final crop read the same pixels.
    pub fn begin(adapter: &dyn CaptureAdapter, pointer: Point) -> Result<Self, CaptureError> {
        if !adapter.has_permission() {
            return Err(CaptureError::PermissionDenied);
        }

        let displays = adapter
            .enumerate_displays()
            .map_err(|err| CaptureError::DisplayEnumeration(err.to_string()))?;
        if displays.is_empty() {
            return Err(CaptureError::DisplayEnumeration(
                "no displays attached".into(),
            ));
        }

        adapter.settle();
        let store = SnapshotStore::capture_all(adapter, &displays);

        let surfaces: Vec<OverlaySurface> = displays
            .iter()
            .filter(|display| store.contains(display.id))
            .map(|display| OverlaySurface::new(display.clone()))
            .collect();
        if surfaces.is_empty() {
            let display = displays[0].id;
            let reason = store
                .failure_reason(display)
                .unwrap_or("snapshot capture failed")
                .to_string();
            return Err(CaptureError::CaptureFailed { display, reason });
        }

        let focused = surfaces
            .iter()
            .find(|s| s.display().contains_global(pointer))
            .map(|s| s.display().id)
            .unwrap_or(surfaces[0].display().id);
        log::debug!(
            "session started with {} surface(s), focus on display {focused}",
            surfaces.len()
        );

        Ok(Self {
            displays,
            store,
            surfaces,
            focused,
            resolved: false,
        })
    }

    /// Whether the session still has live surfaces
    pub fn is_active(&self) -> bool {
        !self.resolved
    }

    /// Apply the magnifier setting to every surface
    pub fn set_magnifier(&mut self, enabled: bool) {
        for surface in &mut self.surfaces {
            surface.set_magnifier(enabled);
        }
    }

    /// The display whose surface currently holds keyboard focus
    pub fn focused(&self) -> DisplayId {
        self.focused
    }

    pub fn surfaces(&self) -> &[OverlaySurface] {
        &self.surfaces
    }

    pub fn surface(&self, id: DisplayId) -> Option<&OverlaySurface> {
        self.surfaces.iter().find(|s| s.display().id == id)
    }

    /// Snapshot backing one surface, for rendering the loupe
    pub fn snapshot(&self, id: DisplayId) -> Option<&crate::capture::Snapshot> {
        self.store.get(id)
    }

    /// Feed one input event from the surface on `display`.
    ///
    /// Events arriving after the session resolved, or for a display
    /// without a surface (its capture failed), are ignored.
    pub fn handle_input(
        &mut self,
        display: DisplayId,
        event: InputEvent,
    ) -> Result<Vec<SessionEvent>, CaptureError> {
        if self.resolved {
            return Ok(Vec::new());
        }

        match event {
            InputEvent::Key(KeyEvent::Escape) => {
                self.teardown();
                Ok(vec![SessionEvent::Resolved(CaptureResult::Cancelled)])
            }
            InputEvent::Key(KeyEvent::CopyColor) => {
                let hex = self
                    .surface(self.focused)
                    .map(|s| s.last_hex())
                    .unwrap_or_else(|| "#FFFFFF".to_string());
                self.teardown();
                Ok(vec![
                    SessionEvent::ColorCopied(hex),
                    SessionEvent::Resolved(CaptureResult::Cancelled),
                ])
            }
            InputEvent::Pointer(pointer_event) => {
                // Focus follows the pointer; a drag may still complete on
                // a display other than the initially focused one.
                let Some(surface) = self.surfaces.iter_mut().find(|s| s.display().id == display)
                else {
                    return Ok(Vec::new());
                };
                self.focused = display;

                let snapshot = self.store.get(display);
                match surface.handle_pointer(pointer_event, snapshot) {
                    Some(SurfaceReply::Committed(rect)) => {
                        let result = self.commit(display, rect)?;
                        Ok(vec![SessionEvent::Resolved(result)])
                    }
                    None => Ok(Vec::new()),
                }
            }
        }
    }

    /// Cancel from outside the event stream (session replacement).
    pub fn cancel(&mut self) -> CaptureResult {
        if !self.resolved {
            self.teardown();
        }
        CaptureResult::Cancelled
    }

    fn commit(&mut self, display: DisplayId, rect: LogicalRect) -> Result<CaptureResult, CaptureError> {
        let outcome = self.crop_committed(display, rect);
        // Success or failure, the commit is terminal: every sibling
        // surface goes down and the snapshots are released.
        self.teardown();
        outcome
    }

    fn crop_committed(
        &self,
        id: DisplayId,
        rect: LogicalRect,
    ) -> Result<CaptureResult, CaptureError> {
        let display = self
            .displays
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| CaptureError::CaptureFailed {
                display: id,
                reason: "display left the session".into(),
            })?;
        let snapshot = self.store.get(id).ok_or_else(|| CaptureError::CaptureFailed {
            display: id,
            reason: self
                .store
                .failure_reason(id)
                .unwrap_or("no snapshot for committing display")
                .to_string(),
        })?;

        let global = display.local_to_global(rect);
        log::debug!(
            "commit on display {id}: local ({}, {}) {}x{}, global ({}, {})",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            global.x,
            global.y
        );

        let image = extract::extract(snapshot, rect, &display)?;
        Ok(CaptureResult::Completed { image, display })
    }

    fn teardown(&mut self) {
        for surface in &mut self.surfaces {
            surface.cancel();
        }
        self.surfaces.clear();
        self.store.release();
        self.resolved = true;
        log::debug!("session torn down");
    }
}

impl Drop for SelectionSession {
    fn drop(&mut self) {
        // A dropped session must not leave surfaces on screen.
        if !self.resolved {
            self.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::testing::FixtureAdapter;
    use image::Rgba;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn two_display_layout() -> Vec<Display> {
        vec![
            Display::new(1, Point::new(0.0, 0.0), (1920.0, 1080.0), 1.0),
            Display::new(2, Point::new(1920.0, 0.0), (1280.0, 800.0), 2.0),
        ]
    }

    fn right_id() -> DisplayId {
        DisplayId(2)
    }

    #[test]
    fn test_begin_focuses_surface_under_pointer() {
        let adapter = FixtureAdapter::new(two_display_layout());
        let session = SelectionSession::begin(&adapter, Point::new(2000.0, 400.0)).unwrap();
        assert_eq!(session.focused(), right_id());
        assert_eq!(session.surfaces().len(), 2);
    }

    #[test]
    fn test_permission_refusal_aborts_before_overlays() {
        let adapter = FixtureAdapter::new(two_display_layout()).without_permission();
        assert!(matches!(
            SelectionSession::begin(&adapter, Point::default()),
            Err(CaptureError::PermissionDenied)
        ));
    }

    #[test]
    fn test_failed_non_active_display_is_excluded() {
        let adapter = FixtureAdapter::new(two_display_layout()).failing(DisplayId(1));
        let mut session = SelectionSession::begin(&adapter, Point::new(2000.0, 400.0)).unwrap();
        assert_eq!(session.surfaces().len(), 1);

        // Input for the excluded display is ignored, session stays open.
        let events = session
            .handle_input(DisplayId(1), InputEvent::pressed(10.0, 10.0))
            .unwrap();
        assert!(events.is_empty());
        assert!(session.is_active());
    }

    #[test]
    fn test_all_captures_failing_aborts() {
        let adapter = FixtureAdapter::new(two_display_layout())
            .failing(DisplayId(1))
            .failing(DisplayId(2));
        assert!(matches!(
            SelectionSession::begin(&adapter, Point::default()),
            Err(CaptureError::CaptureFailed { .. })
        ));
    }

    #[test]
    fn test_escape_cancels_whole_session() {
        let adapter = FixtureAdapter::new(two_display_layout());
        let mut session = SelectionSession::begin(&adapter, Point::new(100.0, 100.0)).unwrap();

        // Escape from the non-focused display's surface still cancels.
        let events = session
            .handle_input(right_id(), InputEvent::escape())
            .unwrap();
        assert!(matches!(
            events.as_slice(),
            [SessionEvent::Resolved(CaptureResult::Cancelled)]
        ));
        assert!(!session.is_active());
        assert!(session.surfaces().is_empty());
    }

    #[test]
    fn test_sub_threshold_release_keeps_session_open() {
        let adapter = FixtureAdapter::new(two_display_layout());
        let mut session = SelectionSession::begin(&adapter, Point::new(100.0, 100.0)).unwrap();

        session
            .handle_input(DisplayId(1), InputEvent::pressed(100.0, 100.0))
            .unwrap();
        let events = session
            .handle_input(DisplayId(1), InputEvent::released(105.0, 300.0))
            .unwrap();

        assert!(events.is_empty());
        assert!(session.is_active());
        assert_eq!(session.surfaces().len(), 2);
        assert_eq!(
            session.surface(DisplayId(1)).unwrap().phase(),
            crate::domain::SurfacePhase::Tracking
        );
    }

    #[test]
    fn test_commit_on_hidpi_secondary_display() {
        init_logging();
        // Left 1920x1080 @1.0 at (0,0); right 1280x800 @2.0 at (1920,0).
        // Drag (100,100) -> (300,250) on the right display must extract a
        // 400x300 bitmap from the right display's snapshot only.
        let adapter = FixtureAdapter::new(two_display_layout())
            .with_color(DisplayId(1), [10, 0, 0, 255])
            .with_color(DisplayId(2), [0, 200, 0, 255]);
        let mut session = SelectionSession::begin(&adapter, Point::new(50.0, 50.0)).unwrap();

        session
            .handle_input(right_id(), InputEvent::pressed(100.0, 100.0))
            .unwrap();
        session
            .handle_input(right_id(), InputEvent::dragged(300.0, 250.0))
            .unwrap();
        let events = session
            .handle_input(right_id(), InputEvent::released(300.0, 250.0))
            .unwrap();

        let [SessionEvent::Resolved(CaptureResult::Completed { image, display })] =
            events.as_slice()
        else {
            panic!("expected a completed capture, got {events:?}");
        };
        assert_eq!(display.id, right_id());
        assert_eq!(image.dimensions(), (400, 300));
        assert!(
            image.pixels().all(|p| *p == Rgba([0, 200, 0, 255])),
            "crop must come from the right display's snapshot"
        );
        assert!(!session.is_active());
        assert!(session.surfaces().is_empty());
    }

    #[test]
    fn test_commit_on_negative_origin_display() {
        init_logging();
        // A secondary display hanging below-left of the primary.
        let displays = vec![
            Display::new(1, Point::new(0.0, 0.0), (1920.0, 1080.0), 1.0),
            Display::new(3, Point::new(-1440.0, -900.0), (1440.0, 900.0), 1.0),
        ];
        let adapter = FixtureAdapter::new(displays).with_color(DisplayId(3), [9, 9, 9, 255]);
        let mut session = SelectionSession::begin(&adapter, Point::new(-700.0, -450.0)).unwrap();
        assert_eq!(session.focused(), DisplayId(3));

        session
            .handle_input(DisplayId(3), InputEvent::pressed(20.0, 30.0))
            .unwrap();
        let events = session
            .handle_input(DisplayId(3), InputEvent::released(140.0, 120.0))
            .unwrap();

        let [SessionEvent::Resolved(CaptureResult::Completed { image, display })] =
            events.as_slice()
        else {
            panic!("expected a completed capture, got {events:?}");
        };
        assert_eq!(display.id, DisplayId(3));
        assert_eq!(image.dimensions(), (120, 90));
    }

    #[test]
    fn test_copy_color_copies_focused_sample_and_cancels() {
        let adapter =
            FixtureAdapter::new(two_display_layout()).with_color(right_id(), [0x33, 0x66, 0x99, 255]);
        let mut session = SelectionSession::begin(&adapter, Point::new(2000.0, 400.0)).unwrap();

        session
            .handle_input(right_id(), InputEvent::moved(640.0, 400.0))
            .unwrap();
        let events = session
            .handle_input(right_id(), InputEvent::copy_color())
            .unwrap();

        let [SessionEvent::ColorCopied(hex), SessionEvent::Resolved(CaptureResult::Cancelled)] =
            events.as_slice()
        else {
            panic!("expected color copy then cancellation, got {events:?}");
        };
        assert_eq!(hex, "#336699");
        assert!(session.surfaces().is_empty());
    }

    #[test]
    fn test_outcome_is_produced_exactly_once() {
        let adapter = FixtureAdapter::new(two_display_layout());
        let mut session = SelectionSession::begin(&adapter, Point::new(100.0, 100.0)).unwrap();

        session
            .handle_input(DisplayId(1), InputEvent::escape())
            .unwrap();
        let again = session
            .handle_input(DisplayId(1), InputEvent::escape())
            .unwrap();
        assert!(again.is_empty());
    }
}
