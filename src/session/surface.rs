//! Per-display overlay surface state machine

use crate::capture::sampling::{self, PixelSample};
use crate::capture::snapshot::Snapshot;
use crate::domain::{Display, LogicalRect, Point, SurfacePhase};

use super::messages::PointerEvent;

/// Minimum committed selection size in logical units. A release below
/// this in either dimension returns the surface to tracking.
pub const MIN_SELECTION_SIZE: f32 = 10.0;

/// Hex reported by the copy-color chord before any pixel was sampled
const DEFAULT_HEX: &str = "#FFFFFF";

/// What a surface hands back to its session after a pointer event
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum SurfaceReply {
    /// The drag released at or above the minimum size
    Committed(LogicalRect),
}

/// Interaction state for one display's overlay.
///
/// The surface owns only per-display state: pointer tracking, the
/// in-progress drag rectangle, and the last loupe sample. Session-wide
/// concerns (teardown of siblings, outcome delivery) belong to the
/// owning session.
#[derive(Debug, Clone)]
pub struct OverlaySurface {
    display: Display,
    phase: SurfacePhase,
    pointer: Option<Point>,
    drag_start: Option<Point>,
    selection: Option<LogicalRect>,
    last_sample: Option<PixelSample>,
    magnifier: bool,
}

impl OverlaySurface {
    pub fn new(display: Display) -> Self {
        Self {
            display,
            phase: SurfacePhase::Idle,
            pointer: None,
            drag_start: None,
            selection: None,
            last_sample: None,
            magnifier: true,
        }
    }

    /// Toggle the loupe for this surface, from the magnifier setting.
    /// Color sampling continues either way so the copy-color chord keeps
    /// working.
    pub fn set_magnifier(&mut self, enabled: bool) {
        self.magnifier = enabled;
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn phase(&self) -> SurfacePhase {
        self.phase
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// The in-progress drag rectangle, normalized
    pub fn selection(&self) -> Option<LogicalRect> {
        self.selection
    }

    /// Last color sampled under the pointer on this surface
    pub fn last_sample(&self) -> Option<PixelSample> {
        self.last_sample
    }

    /// Hex string for the copy-color chord
    pub fn last_hex(&self) -> String {
        self.last_sample
            .map(|s| s.hex())
            .unwrap_or_else(|| DEFAULT_HEX.to_string())
    }

    /// Whether the loupe should be drawn: tracking with a valid sample,
    /// hidden while dragging or when the magnifier is turned off
    pub fn loupe_visible(&self) -> bool {
        self.magnifier && self.phase == SurfacePhase::Tracking && self.last_sample.is_some()
    }

    pub(crate) fn handle_pointer(
        &mut self,
        event: PointerEvent,
        snapshot: Option<&Snapshot>,
    ) -> Option<SurfaceReply> {
        match event {
            PointerEvent::Moved(p) => {
                if self.phase == SurfacePhase::Idle {
                    self.phase = SurfacePhase::Tracking;
                }
                self.pointer = Some(p);
                if let Some(snapshot) = snapshot
                    && let Some(sample) = sampling::sample_at(snapshot, &self.display, p)
                {
                    self.last_sample = Some(sample);
                }
                None
            }
            PointerEvent::Pressed(p) => {
                self.phase = SurfacePhase::Dragging;
                self.pointer = Some(p);
                self.drag_start = Some(p);
                self.selection = Some(LogicalRect::from_points(p, p));
                None
            }
            PointerEvent::Dragged(p) => {
                self.pointer = Some(p);
                if let Some(start) = self.drag_start {
                    self.selection = Some(LogicalRect::from_points(start, p));
                }
                None
            }
            PointerEvent::Released(p) => {
                self.pointer = Some(p);
                let rect = self
                    .drag_start
                    .map(|start| LogicalRect::from_points(start, p));
                self.drag_start = None;

                match rect {
                    Some(rect)
                        if rect.width >= MIN_SELECTION_SIZE
                            && rect.height >= MIN_SELECTION_SIZE =>
                    {
                        self.phase = SurfacePhase::Committed;
                        self.selection = Some(rect);
                        Some(SurfaceReply::Committed(rect))
                    }
                    _ => {
                        // Sub-threshold release: not a commit, not a cancel.
                        // Back to tracking, loupe visible again.
                        log::debug!(
                            "sub-threshold release on display {}, staying open",
                            self.display.id
                        );
                        self.phase = SurfacePhase::Tracking;
                        self.selection = None;
                        None
                    }
                }
            }
        }
    }

    /// Session-wide cancellation reached this surface
    pub(crate) fn cancel(&mut self) {
        self.phase = SurfacePhase::Cancelled;
        self.selection = None;
        self.drag_start = None;
    }
}
