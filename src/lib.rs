//! Drag-select screen capture core
//!
//! Coordinates per-display overlay surfaces over race-free screen
//! snapshots: the user drags a rectangle on any display, the selection is
//! mapped from logical to physical-pixel space and cropped, optional
//! pixelation redaction destroys marked areas, and the finished bitmap is
//! handed to an upload collaborator as PNG bytes.
//!
//! The compositor binding, preview window, and upload transport live in
//! the embedding shell, behind [`capture::CaptureAdapter`] and the traits
//! in [`crate::core::collaborators`].

pub mod capture;
pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod render;
pub mod session;

pub use capture::{CaptureAdapter, Snapshot};
pub use config::Config;
pub use crate::core::{CaptureCoordinator, ClipboardSink, PreviewSink, Uploader};
pub use domain::{CaptureResult, Display, DisplayId, LogicalRect, Point, RedactRegion};
pub use error::CaptureError;
pub use session::{InputEvent, SelectionSession};
