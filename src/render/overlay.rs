//! Overlay surface rendering using tiny-skia
//!
//! Draws the dimming scrim, pointer guides, and the drag rectangle into
//! an RGBA pixmap sized in logical units. Text (the size label, the
//! loupe's hex readout) is surfaced as strings for the shell to typeset.

use tiny_skia::{
    BlendMode, Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};

use crate::capture::snapshot::Snapshot;
use crate::domain::{LogicalRect, Point, SurfacePhase};
use crate::session::OverlaySurface;

use super::loupe;

/// Scrim opacity over the desktop while selecting
const SCRIM_ALPHA: f32 = 0.3;
/// Selection border stroke width
const SELECTION_STROKE: f32 = 2.0;
/// Corner handle radius (8px handles)
const HANDLE_RADIUS: f32 = 4.0;
/// Solid crosshair arm length around the pointer
const CROSSHAIR_ARM: f32 = 10.0;

/// Convert a logical (bottom-left origin) rect into pixmap canvas
/// coordinates (top-left origin)
fn canvas_rect(rect: LogicalRect, surface_height: f32) -> Option<Rect> {
    Rect::from_xywh(
        rect.x,
        surface_height - rect.y - rect.height,
        rect.width,
        rect.height,
    )
}

fn canvas_y(y: f32, surface_height: f32) -> f32 {
    surface_height - y
}

/// The live "W × H" label shown above the drag rectangle
pub fn size_label(rect: &LogicalRect) -> String {
    format!(
        "{} × {}",
        rect.width.round() as i32,
        rect.height.round() as i32
    )
}

/// Render one surface's full scene: scrim, then either the drag
/// rectangle with handles or the idle pointer guides plus loupe.
///
/// The pixmap must match the surface's logical size (one pixel per
/// logical unit); it is cleared to the scrim before anything else draws.
pub fn render_surface(surface: &OverlaySurface, snapshot: Option<&Snapshot>, pixmap: &mut Pixmap) {
    let height = surface.display().logical_size.1;

    pixmap.fill(Color::from_rgba(0.0, 0.0, 0.0, SCRIM_ALPHA).unwrap_or(Color::BLACK));

    let dragging = matches!(
        surface.phase(),
        SurfacePhase::Dragging | SurfacePhase::Committed
    );
    match surface.selection() {
        Some(selection) if dragging => draw_selection(pixmap, selection, height),
        _ => {
            if let Some(pointer) = surface.pointer() {
                draw_pointer_guides(pixmap, pointer, height);
                if surface.loupe_visible()
                    && let Some(snapshot) = snapshot
                {
                    loupe::render_loupe(pixmap, snapshot, surface, pointer);
                }
            }
        }
    }
}

fn draw_selection(pixmap: &mut Pixmap, selection: LogicalRect, surface_height: f32) {
    let Some(rect) = canvas_rect(selection, surface_height) else {
        return;
    };

    // Punch the selection out of the scrim so the desktop shows through.
    let mut clear = Paint::default();
    clear.blend_mode = BlendMode::Clear;
    pixmap.fill_rect(rect, &clear, Transform::identity(), None);

    // White border
    let mut paint = Paint::default();
    paint.set_color_rgba8(255, 255, 255, 255);
    paint.anti_alias = true;

    let mut pb = PathBuilder::new();
    pb.move_to(rect.left(), rect.top());
    pb.line_to(rect.right(), rect.top());
    pb.line_to(rect.right(), rect.bottom());
    pb.line_to(rect.left(), rect.bottom());
    pb.close();
    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width: SELECTION_STROKE,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    // Corner handles
    let mut handles = PathBuilder::new();
    for (x, y) in [
        (rect.left(), rect.top()),
        (rect.right(), rect.top()),
        (rect.left(), rect.bottom()),
        (rect.right(), rect.bottom()),
    ] {
        handles.push_circle(x, y, HANDLE_RADIUS);
    }
    if let Some(path) = handles.finish() {
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn draw_pointer_guides(pixmap: &mut Pixmap, pointer: Point, surface_height: f32) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;
    let py = canvas_y(pointer.y, surface_height);

    // Dashed guide lines spanning the surface
    let mut guide_paint = Paint::default();
    guide_paint.set_color_rgba8(255, 255, 255, 153);

    let mut pb = PathBuilder::new();
    pb.move_to(0.0, py);
    pb.line_to(width, py);
    pb.move_to(pointer.x, 0.0);
    pb.line_to(pointer.x, height);
    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width: 1.0,
            dash: StrokeDash::new(vec![5.0, 5.0], 0.0),
            ..Default::default()
        };
        pixmap.stroke_path(&path, &guide_paint, &stroke, Transform::identity(), None);
    }

    // Solid cross at the pointer itself
    let mut cross_paint = Paint::default();
    cross_paint.set_color_rgba8(255, 255, 255, 255);

    let mut pb = PathBuilder::new();
    pb.move_to(pointer.x - CROSSHAIR_ARM, py);
    pb.line_to(pointer.x + CROSSHAIR_ARM, py);
    pb.move_to(pointer.x, py - CROSSHAIR_ARM);
    pb.line_to(pointer.x, py + CROSSHAIR_ARM);
    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width: 2.0,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &cross_paint, &stroke, Transform::identity(), None);
    }
}
