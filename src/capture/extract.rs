//! Region extraction: committed selection to result bitmap

use image::RgbaImage;

use crate::domain::{Display, LogicalRect, geometry};
use crate::error::CaptureError;

use super::snapshot::Snapshot;

/// Crop a display's snapshot to a committed selection.
///
/// The rectangle arrives in the display's local logical space; it is
/// scaled into snapshot pixel space, vertically flipped, and clamped to
/// the buffer so selections drawn at the extreme edge never read past it.
/// The returned bitmap owns its memory, so the snapshot can be released
/// immediately after.
pub fn extract(
    snapshot: &Snapshot,
    rect: LogicalRect,
    display: &Display,
) -> Result<RgbaImage, CaptureError> {
    let pixel_rect = geometry::logical_to_snapshot(rect, display.logical_height(), display.scale);
    let clamped = pixel_rect
        .intersect(snapshot.bounds())
        .ok_or(CaptureError::ZeroAreaCrop)?;
    let dims = clamped.dimensions().ok_or(CaptureError::ZeroAreaCrop)?;

    log::debug!(
        "extracting {}x{} at ({}, {}) from display {} snapshot",
        dims.width(),
        dims.height(),
        clamped.left,
        clamped.top,
        display.id
    );

    Ok(image::imageops::crop_imm(
        snapshot.pixels(),
        clamped.left as u32,
        clamped.top as u32,
        dims.width(),
        dims.height(),
    )
    .to_image())
}
