//! Error types for the capture subsystem

use thiserror::Error;

use crate::domain::DisplayId;

/// Failures that can abort a capture session.
///
/// A sub-threshold drag release is not represented here: it returns the
/// surface to tracking and keeps the session open. Redaction targets that
/// are too small to pixelate are skipped, not reported.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The capture API refused access. The session aborts before any
    /// overlay is shown.
    #[error("screen capture permission denied")]
    PermissionDenied,

    /// Display enumeration failed or produced no usable displays.
    #[error("failed to enumerate displays: {0}")]
    DisplayEnumeration(String),

    /// A display's snapshot could not be taken. Fatal only when that
    /// display ends up hosting the committed selection.
    #[error("snapshot capture failed for display {display}: {reason}")]
    CaptureFailed { display: DisplayId, reason: String },

    /// The committed selection clamped to a zero-area pixel rectangle.
    /// Unreachable given the minimum drag threshold, but never silently
    /// substituted with an empty image.
    #[error("selection clamped to a zero-area pixel rectangle")]
    ZeroAreaCrop,

    /// PNG encoding of the finished bitmap failed.
    #[error("png encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}
