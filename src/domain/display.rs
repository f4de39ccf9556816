//! Display descriptors for the session's monitor layout

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::{LogicalRect, Point};

/// Stable identifier for a display, valid for one session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayId(pub u32);

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One attached display. Immutable for the lifetime of a session.
///
/// `origin` is the display's bottom-left corner in the global logical
/// space; secondary displays can sit at negative coordinates and have
/// heights that differ from the primary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Display {
    pub id: DisplayId,
    /// Bottom-left corner in global logical coordinates
    pub origin: Point,
    /// Logical width and height
    pub logical_size: (f32, f32),
    /// Ratio of physical pixels to logical units (e.g. 2.0 for HiDPI)
    pub scale: f32,
}

impl Display {
    pub fn new(id: u32, origin: Point, logical_size: (f32, f32), scale: f32) -> Self {
        Self {
            id: DisplayId(id),
            origin,
            logical_size,
            scale,
        }
    }

    /// Logical height, the quantity the vertical-axis flip pivots on
    pub fn logical_height(&self) -> f32 {
        self.logical_size.1
    }

    /// Expected snapshot dimensions in physical pixels
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.logical_size.0 * self.scale).round() as u32,
            (self.logical_size.1 * self.scale).round() as u32,
        )
    }

    /// The display's bounds in global logical coordinates
    pub fn global_bounds(&self) -> LogicalRect {
        LogicalRect::new(
            self.origin.x,
            self.origin.y,
            self.logical_size.0,
            self.logical_size.1,
        )
    }

    /// Check whether a global logical point falls on this display
    pub fn contains_global(&self, p: Point) -> bool {
        self.global_bounds().contains(p)
    }

    /// Translate a display-local rectangle into global logical space
    pub fn local_to_global(&self, rect: LogicalRect) -> LogicalRect {
        rect.translate(self.origin.x, self.origin.y)
    }

    /// Translate a global logical point into this display's local space
    pub fn global_to_local(&self, p: Point) -> Point {
        Point::new(p.x - self.origin.x, p.y - self.origin.y)
    }
}
