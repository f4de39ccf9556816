//! Domain types: geometry, displays, and selection outcomes

pub mod display;
pub mod geometry;
pub mod selection;

pub use display::{Display, DisplayId};
pub use geometry::{FitBox, LogicalRect, PixelRect, Point, RectDimension};
pub use selection::{CaptureResult, RedactRegion, SurfacePhase};
