//! Immutable per-display pixel snapshots

use chrono::{DateTime, Local};
use image::RgbaImage;

use crate::domain::{DisplayId, PixelRect};

/// A raw RGBA capture of one display, taken at session start.
///
/// Snapshots are never mutated: the same buffer backs the loupe and the
/// final crop, so what the user sampled is exactly what gets cropped.
#[derive(Clone, Debug)]
pub struct Snapshot {
    display: DisplayId,
    pixels: RgbaImage,
    taken_at: DateTime<Local>,
}

impl Snapshot {
    pub fn new(display: DisplayId, pixels: RgbaImage) -> Self {
        log::debug!(
            "snapshot captured for display {}: {}x{} pixels",
            display,
            pixels.width(),
            pixels.height()
        );
        Self {
            display,
            pixels,
            taken_at: Local::now(),
        }
    }

    pub fn display(&self) -> DisplayId {
        self.display
    }

    /// Physical pixel width
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Physical pixel height
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn taken_at(&self) -> DateTime<Local> {
        self.taken_at
    }

    /// Full buffer bounds in pixel space
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width() as i32, self.height() as i32)
    }
}
