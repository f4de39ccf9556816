//! Destructive pixelation redaction
//!
//! Pixelation here destroys information rather than hiding it: each block
//! keeps exactly one sample (its center pixel) and discards the rest, so
//! no linear deconvolution can recover the original content. Averaging or
//! blurring would leave a recoverable gradient; this must not.

use image::{Rgba, RgbaImage};

use crate::domain::{PixelRect, RedactRegion, geometry};

/// Number of pixelation blocks along a target's longer side
pub const DEFAULT_BLOCKS: u32 = 8;

/// Blocks smaller than this are unredactable; the target is skipped
pub const MIN_BLOCK_PX: u32 = 2;

/// Pixelate the given regions of a working bitmap.
///
/// Regions arrive in the displayed preview's coordinate space, which may
/// letterbox the bitmap; each is mapped through the aspect-fit placement
/// into bitmap pixel space, clamped, and discarded if empty. The bitmap
/// is mutated in place: there is no undo short of re-selecting, and
/// repeated passes compose.
pub fn redact(image: &mut RgbaImage, regions: &[RedactRegion], preview: (f32, f32), blocks: u32) {
    if regions.is_empty() {
        return;
    }
    let (width, height) = image.dimensions();
    let bounds = PixelRect::new(0, 0, width as i32, height as i32);
    let fit = geometry::aspect_fit((width as f32, height as f32), preview);

    for region in regions {
        let mapped = geometry::preview_to_bitmap(region.rect, &fit, (width, height));
        let Some(clamped) = mapped.intersect(bounds) else {
            continue;
        };
        pixelate_rect(image, clamped, blocks);
    }
}

/// Overwrite every pixel of `rect` (already clamped to the bitmap) with
/// its block's center-pixel color at full opacity.
///
/// Block size is the rect's longer dimension divided by `blocks`; targets
/// whose blocks would fall below [`MIN_BLOCK_PX`] are skipped.
pub fn pixelate_rect(image: &mut RgbaImage, rect: PixelRect, blocks: u32) {
    let longer = rect.width().max(rect.height()) as u32;
    let block = longer / blocks.max(1);
    if block < MIN_BLOCK_PX {
        log::debug!(
            "redaction target {}x{} too small to pixelate, skipping",
            rect.width(),
            rect.height()
        );
        return;
    }

    let (left, top) = (rect.left as u32, rect.top as u32);
    let (right, bottom) = (rect.right as u32, rect.bottom as u32);

    let mut block_y = top;
    while block_y < bottom {
        let block_h = block.min(bottom - block_y);
        let mut block_x = left;
        while block_x < right {
            let block_w = block.min(right - block_x);

            let center = *image.get_pixel(block_x + block_w / 2, block_y + block_h / 2);
            let color = Rgba([center[0], center[1], center[2], 255]);
            for y in block_y..block_y + block_h {
                for x in block_x..block_x + block_w {
                    image.put_pixel(x, y, color);
                }
            }

            block_x += block;
        }
        block_y += block;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LogicalRect;

    /// Image where every pixel differs, to make surviving detail obvious
    fn gradient_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 200])
        })
    }

    fn region(x: f32, y: f32, w: f32, h: f32) -> RedactRegion {
        RedactRegion::new(LogicalRect::new(x, y, w, h))
    }

    #[test]
    fn test_blocks_have_zero_variance_and_full_opacity() {
        let mut image = gradient_image(400, 300);
        // Preview matches the bitmap, so mapping is a pure vertical flip.
        redact(&mut image, &[region(80.0, 60.0, 160.0, 80.0)], (400.0, 300.0), DEFAULT_BLOCKS);

        // Preview rect (80,60,160,80) -> pixel rect (80,160)-(240,240).
        // Longer side 160 / 8 = 20px blocks.
        let block = 20;
        for by in (160..240).step_by(block) {
            for bx in (80..240).step_by(block) {
                let expected = *image.get_pixel(bx as u32, by as u32);
                assert_eq!(expected[3], 255);
                for y in by..by + block {
                    for x in bx..bx + block {
                        assert_eq!(*image.get_pixel(x as u32, y as u32), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_redaction_is_idempotent() {
        let mut once = gradient_image(400, 300);
        let regions = [region(10.0, 10.0, 200.0, 100.0)];
        redact(&mut once, &regions, (400.0, 300.0), DEFAULT_BLOCKS);

        let mut twice = once.clone();
        redact(&mut twice, &regions, (400.0, 300.0), DEFAULT_BLOCKS);

        assert_eq!(once.as_raw(), twice.as_raw());
    }

    #[test]
    fn test_passes_compose() {
        let mut image = gradient_image(400, 300);
        redact(&mut image, &[region(0.0, 0.0, 100.0, 100.0)], (400.0, 300.0), DEFAULT_BLOCKS);
        let after_first = image.clone();
        redact(&mut image, &[region(50.0, 50.0, 100.0, 100.0)], (400.0, 300.0), DEFAULT_BLOCKS);

        // Second pass only touches its own mapped rect; the rest of the
        // first pass's output survives.
        assert_ne!(image.as_raw(), after_first.as_raw());
        assert_eq!(image.get_pixel(399, 0), after_first.get_pixel(399, 0));
    }

    #[test]
    fn test_too_small_target_is_skipped() {
        let mut image = gradient_image(400, 300);
        let before = image.clone();
        // 12px longer side / 8 blocks = 1px blocks, below the minimum.
        redact(&mut image, &[region(20.0, 20.0, 12.0, 8.0)], (400.0, 300.0), DEFAULT_BLOCKS);
        assert_eq!(image.as_raw(), before.as_raw());
    }

    #[test]
    fn test_region_in_letterbox_padding_is_discarded() {
        // 400x300 bitmap aspect-fit in a 400x400 preview leaves 50 units
        // of padding below the content.
        let mut image = gradient_image(400, 300);
        let before = image.clone();
        redact(&mut image, &[region(0.0, 0.0, 400.0, 45.0)], (400.0, 400.0), DEFAULT_BLOCKS);
        assert_eq!(image.as_raw(), before.as_raw());
    }

    #[test]
    fn test_letterboxed_region_maps_into_bitmap() {
        // Same letterboxed preview; a region in the content's lower-left
        // corner must land at the bitmap's bottom-left.
        let mut image = gradient_image(400, 300);
        redact(&mut image, &[region(0.0, 50.0, 80.0, 80.0)], (400.0, 400.0), DEFAULT_BLOCKS);

        // Mapped rect is (0,220)-(80,300); 80/8 = 10px blocks.
        let sample = *image.get_pixel(0, 220);
        for y in 220..230 {
            for x in 0..10 {
                assert_eq!(*image.get_pixel(x, y), sample);
            }
        }
        // Pixels above the mapped rect are untouched gradient.
        assert_eq!(*image.get_pixel(0, 219), Rgba([0, 219, 219, 200]));
    }
}
