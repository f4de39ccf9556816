//! Coordinator facade and its collaborator seams
//!
//! This module contains:
//! - Collaborator traits for upload, clipboard, and preview (collaborators.rs)
//! - The background redaction worker (worker.rs)
//! - The capture coordinator driving one capture-and-upload flow (coordinator.rs)

pub mod collaborators;
pub mod coordinator;
pub mod worker;

pub use collaborators::{ClipboardSink, PreviewSink, Uploader};
pub use coordinator::{CaptureCoordinator, encode_png};
