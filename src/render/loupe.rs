//! Loupe rendering: a magnified pixel grid for precise color picking

use tiny_skia::{Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::capture::snapshot::Snapshot;
use crate::domain::{Point, geometry};
use crate::session::OverlaySurface;

/// Samples per side of the magnified grid; odd so one cell is the pointer
pub const GRID: i32 = 11;
/// Loupe panel dimensions in logical units
pub const PANEL_WIDTH: f32 = 140.0;
pub const PANEL_HEIGHT: f32 = 170.0;
/// Side of the magnified grid box inside the panel
const GRID_BOX: f32 = 120.0;
/// Panel margin and swatch layout
const MARGIN: f32 = 10.0;
const SWATCH_SIDE: f32 = 30.0;
/// Distance between the pointer and the panel
const OFFSET: f32 = 30.0;

/// Where the loupe panel sits (bottom-left corner, logical coords):
/// offset diagonally from the pointer, flipped when it would leave the
/// surface.
pub fn panel_origin(pointer: Point, surface_size: (f32, f32)) -> Point {
    let mut x = pointer.x + OFFSET;
    let mut y = pointer.y + OFFSET;
    if x + PANEL_WIDTH > surface_size.0 {
        x = pointer.x - PANEL_WIDTH - OFFSET;
    }
    if y + PANEL_HEIGHT > surface_size.1 {
        y = pointer.y - PANEL_HEIGHT - OFFSET;
    }
    Point::new(x, y)
}

/// Draw the loupe panel: color swatch on top, magnified pixel grid with a
/// highlighted center cell below. Pixels come straight from the display's
/// snapshot; cells that fall outside the buffer are left unfilled. The
/// hex readout is `surface.last_hex()`, typeset by the shell.
pub fn render_loupe(
    pixmap: &mut Pixmap,
    snapshot: &Snapshot,
    surface: &OverlaySurface,
    pointer: Point,
) {
    let display = surface.display();
    let origin = panel_origin(pointer, display.logical_size);
    let panel_x = origin.x;
    let panel_y = display.logical_size.1 - origin.y - PANEL_HEIGHT;

    // Panel background
    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, 230);
    if let Some(rect) = Rect::from_xywh(panel_x, panel_y, PANEL_WIDTH, PANEL_HEIGHT) {
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    // Swatch showing the current sample
    if let Some(sample) = surface.last_sample()
        && let Some(rect) = Rect::from_xywh(panel_x + MARGIN, panel_y + MARGIN, SWATCH_SIDE, SWATCH_SIDE)
    {
        let mut swatch = Paint::default();
        swatch.set_color_rgba8(sample.r, sample.g, sample.b, 255);
        pixmap.fill_rect(rect, &swatch, Transform::identity(), None);
    }

    // Magnified grid centered on the pointer's snapshot pixel
    let grid_x = panel_x + MARGIN;
    let grid_y = panel_y + MARGIN + SWATCH_SIDE + MARGIN;
    let cell = GRID_BOX / GRID as f32;
    let (cx, cy) = geometry::point_to_snapshot(pointer, display.logical_height(), display.scale);

    let half = GRID / 2;
    for gy in 0..GRID {
        for gx in 0..GRID {
            let sx = cx + gx - half;
            let sy = cy + gy - half;
            if sx < 0 || sy < 0 || sx >= snapshot.width() as i32 || sy >= snapshot.height() as i32 {
                continue;
            }
            let pixel = snapshot.pixels().get_pixel(sx as u32, sy as u32);
            let Some(rect) = Rect::from_xywh(
                grid_x + gx as f32 * cell,
                grid_y + gy as f32 * cell,
                cell,
                cell,
            ) else {
                continue;
            };
            let mut fill = Paint::default();
            fill.set_color_rgba8(pixel[0], pixel[1], pixel[2], 255);
            pixmap.fill_rect(rect, &fill, Transform::identity(), None);
        }
    }

    // Grid lines
    let mut lines = PathBuilder::new();
    for i in 0..=GRID {
        let offset = i as f32 * cell;
        lines.move_to(grid_x + offset, grid_y);
        lines.line_to(grid_x + offset, grid_y + GRID_BOX);
        lines.move_to(grid_x, grid_y + offset);
        lines.line_to(grid_x + GRID_BOX, grid_y + offset);
    }
    if let Some(path) = lines.finish() {
        let mut line_paint = Paint::default();
        line_paint.set_color_rgba8(0, 0, 0, 77);
        let stroke = Stroke {
            width: 0.5,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &line_paint, &stroke, Transform::identity(), None);
    }

    // Center cell highlight
    let center_offset = half as f32 * cell;
    let mut center = PathBuilder::new();
    center.move_to(grid_x + center_offset, grid_y + center_offset);
    center.line_to(grid_x + center_offset + cell, grid_y + center_offset);
    center.line_to(grid_x + center_offset + cell, grid_y + center_offset + cell);
    center.line_to(grid_x + center_offset, grid_y + center_offset + cell);
    center.close();
    if let Some(path) = center.finish() {
        let mut highlight = Paint::default();
        highlight.set_color_rgba8(255, 255, 255, 255);
        let stroke = Stroke {
            width: 2.0,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &highlight, &stroke, Transform::identity(), None);
    }
}
