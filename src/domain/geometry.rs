//! Geometric types and coordinate mappings for capture regions
//!
//! Every conversion between coordinate spaces lives here: display-local
//! logical space (bottom-left origin, resolution independent), snapshot
//! pixel space (top-left origin, physical pixels), and the aspect-fit
//! preview space used by redaction. Call sites never inline transforms.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A point in logical coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A normalized rectangle in logical coordinates, bottom-left origin
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LogicalRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LogicalRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a normalized rectangle from two drag points, in any order
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// Translate the rectangle by the given offset
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Check if this rectangle contains a point
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// Pixel-space rectangle, top-left origin, half-open on right/bottom
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    /// Create a new rectangle from edge coordinates
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Calculate the intersection of two rectangles
    pub fn intersect(&self, other: PixelRect) -> Option<PixelRect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        if left < right && top < bottom {
            Some(PixelRect {
                left,
                top,
                right,
                bottom,
            })
        } else {
            None
        }
    }

    /// Get the width of the rectangle
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Get the height of the rectangle
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Convert to dimensions (NonZeroU32 width and height)
    pub fn dimensions(self) -> Option<RectDimension> {
        let width = NonZeroU32::new(self.width().unsigned_abs())?;
        let height = NonZeroU32::new(self.height().unsigned_abs())?;
        Some(RectDimension { width, height })
    }
}

/// Non-zero dimensions of a rectangle
#[derive(Clone, Copy, Debug)]
pub struct RectDimension {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl RectDimension {
    /// Get the width as u32
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    /// Get the height as u32
    pub fn height(&self) -> u32 {
        self.height.get()
    }
}

/// Map a display-local logical rectangle into snapshot pixel space.
///
/// Multiplies by the backing scale factor and flips the vertical axis:
/// logical space grows upward from the display's bottom-left corner, the
/// snapshot buffer grows downward from its top-left.
pub fn logical_to_snapshot(rect: LogicalRect, logical_height: f32, scale: f32) -> PixelRect {
    let left = (rect.x * scale).round() as i32;
    let top = ((logical_height - rect.y - rect.height) * scale).round() as i32;
    let width = (rect.width * scale).round() as i32;
    let height = (rect.height * scale).round() as i32;
    PixelRect::new(left, top, left + width, top + height)
}

/// Map a display-local logical point to snapshot pixel coordinates.
///
/// Returns signed coordinates; callers bounds-check against the snapshot
/// before reading.
pub fn point_to_snapshot(p: Point, logical_height: f32, scale: f32) -> (i32, i32) {
    let x = (p.x * scale).floor() as i32;
    let y = ((logical_height - p.y) * scale).floor() as i32;
    (x, y)
}

/// The sub-rectangle a bitmap occupies inside a viewport after aspect-fit
/// scaling, with symmetric letterbox padding on at most one axis.
/// Origin is bottom-left, matching the preview's coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Compute the aspect-fit placement of `content` inside `viewport`.
pub fn aspect_fit(content: (f32, f32), viewport: (f32, f32)) -> FitBox {
    let (cw, ch) = content;
    let (vw, vh) = viewport;
    let scale = (vw / cw).min(vh / ch);
    let width = cw * scale;
    let height = ch * scale;
    FitBox {
        x: (vw - width) / 2.0,
        y: (vh - height) / 2.0,
        width,
        height,
    }
}

/// Map a rectangle given in preview space (bottom-left origin, possibly
/// letterboxed) into bitmap pixel space (top-left origin).
///
/// Subtracts the letterbox offset, rescales by the bitmap/preview ratio,
/// and flips the vertical axis. The result is unclamped; callers intersect
/// with the bitmap bounds and discard empty results.
pub fn preview_to_bitmap(region: LogicalRect, fit: &FitBox, bitmap: (u32, u32)) -> PixelRect {
    let (bw, bh) = (bitmap.0 as f32, bitmap.1 as f32);
    // Bitmap pixels per preview unit
    let scale = bw / fit.width;

    let left = (region.x - fit.x) * scale;
    let bottom_up = (region.y - fit.y) * scale;
    let width = region.width * scale;
    let height = region.height * scale;
    let top = bh - bottom_up - height;

    let left = left.round() as i32;
    let top = top.round() as i32;
    PixelRect::new(
        left,
        top,
        left + width.round() as i32,
        top + height.round() as i32,
    )
}
