//! Selection and outcome types for a capture session

use image::RgbaImage;

use super::display::Display;
use super::geometry::LogicalRect;

/// Per-surface interaction state.
///
/// `Committed` and `Cancelled` are terminal; a sub-threshold release is
/// neither and drops the surface back to `Tracking`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfacePhase {
    /// No pointer activity observed yet
    #[default]
    Idle,
    /// Pointer present, crosshair and loupe following it
    Tracking,
    /// Button held, selection rectangle growing
    Dragging,
    /// Drag released above the minimum size
    Committed,
    /// Session-wide cancellation reached this surface
    Cancelled,
}

/// The single outcome of a capture session, produced exactly once
#[derive(Debug, Clone)]
pub enum CaptureResult {
    /// A region was selected and cropped from its display's snapshot
    Completed {
        image: RgbaImage,
        display: Display,
    },
    /// The user backed out (Escape, copy-color, session replacement)
    Cancelled,
}

/// A rectangle to pixelate, expressed in the displayed preview's
/// coordinate space (bottom-left origin, possibly letterboxed)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RedactRegion {
    pub rect: LogicalRect,
}

impl RedactRegion {
    pub fn new(rect: LogicalRect) -> Self {
        Self { rect }
    }
}
