//! Collaborator contracts at the subsystem boundary
//!
//! The capture core hands finished bitmaps and strings across these
//! traits; transports, windows, and pasteboards live in the shell.

use image::RgbaImage;

/// Upload collaborator: PNG bytes in, public URL out. The core depends
/// only on this contract, not on the transport or signing scheme.
pub trait Uploader {
    fn upload(&self, png_bytes: &[u8]) -> anyhow::Result<String>;
}

/// Plain "set text" sink, fed either an uploaded URL or a sampled hex
/// color.
pub trait ClipboardSink {
    fn set_text(&self, text: &str);
}

/// Preview/history collaborator. Receives the finished bitmap, upload
/// progress, and the public URL once available.
pub trait PreviewSink {
    /// A finished (or freshly redacted) bitmap is ready to display
    fn show(&self, image: &RgbaImage);
    fn uploading(&self);
    fn uploaded(&self, url: &str, filename: &str);
    /// An inline, user-visible failure; the session is already torn down
    fn error(&self, message: &str);
}
