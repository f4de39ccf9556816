//! Capture coordinator: the facade over one capture-and-upload flow
//!
//! Starts sessions, receives the single outcome, drives optional
//! redaction passes, and hands PNG bytes to the upload collaborator.

use chrono::Utc;
use image::RgbaImage;

use crate::capture::adapter::CaptureAdapter;
use crate::config::Config;
use crate::domain::{CaptureResult, Display, DisplayId, Point, RedactRegion};
use crate::error::CaptureError;
use crate::session::{InputEvent, SelectionSession, SessionEvent};

use super::collaborators::{ClipboardSink, PreviewSink, Uploader};
use super::worker::{RedactionDone, RedactionJob, RedactionWorker};

/// Encode a bitmap as PNG bytes for the upload collaborator
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CaptureError> {
    let mut buffer = Vec::new();
    let mut encoder = png::Encoder::new(&mut buffer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;
    Ok(buffer)
}

/// The capture attempt currently being previewed. The bitmap is `None`
/// while a redaction pass owns it on the worker thread.
struct WorkingCapture {
    image: Option<RgbaImage>,
    display: Display,
}

/// Facade owning the adapter, collaborators, and at most one live
/// session plus one working capture at a time.
pub struct CaptureCoordinator<A, U, C, P> {
    adapter: A,
    uploader: U,
    clipboard: C,
    preview: P,
    config: Config,
    session: Option<SelectionSession>,
    working: Option<WorkingCapture>,
    worker: RedactionWorker,
    /// Bumped whenever the working capture changes hands; worker results
    /// tagged with an older value are discarded unconditionally.
    capture_seq: u64,
    upload_seq: u32,
}

impl<A, U, C, P> CaptureCoordinator<A, U, C, P>
where
    A: CaptureAdapter,
    U: Uploader,
    C: ClipboardSink,
    P: PreviewSink,
{
    pub fn new(adapter: A, uploader: U, clipboard: C, preview: P, config: Config) -> Self {
        Self {
            adapter,
            uploader,
            clipboard,
            preview,
            config,
            session: None,
            working: None,
            worker: RedactionWorker::spawn(),
            capture_seq: 0,
            upload_seq: 0,
        }
    }

    /// Start a new selection session at the given global pointer
    /// position. Replaces (and cancels) any previous attempt.
    pub fn start_capture(&mut self, pointer: Point) -> Result<(), CaptureError> {
        self.cancel_session();
        self.discard_working();

        match SelectionSession::begin(&self.adapter, pointer) {
            Ok(mut session) => {
                session.set_magnifier(self.config.magnifier_enabled);
                self.session = Some(session);
                Ok(())
            }
            Err(err) => {
                log::error!("could not start capture session: {err}");
                self.preview.error(&err.to_string());
                Err(err)
            }
        }
    }

    pub fn session(&self) -> Option<&SelectionSession> {
        self.session.as_ref()
    }

    /// The finished bitmap awaiting upload, if no redaction pass holds it
    pub fn working_image(&self) -> Option<&RgbaImage> {
        self.working.as_ref().and_then(|w| w.image.as_ref())
    }

    /// Forward one input event to the live session and act on whatever it
    /// reports back.
    pub fn handle_input(
        &mut self,
        display: DisplayId,
        event: InputEvent,
    ) -> Result<(), CaptureError> {
        let events = match self.session.as_mut() {
            Some(session) => session.handle_input(display, event),
            None => return Ok(()),
        };

        match events {
            Ok(events) => {
                for event in events {
                    self.on_session_event(event);
                }
                Ok(())
            }
            Err(err) => {
                // The session tore itself down; surface the failure inline.
                self.session = None;
                log::error!("capture failed: {err}");
                self.preview.error(&err.to_string());
                Err(err)
            }
        }
    }

    fn on_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::ColorCopied(hex) => {
                log::debug!("copied {hex} to clipboard");
                self.clipboard.set_text(&hex);
            }
            SessionEvent::Resolved(CaptureResult::Cancelled) => {
                self.session = None;
            }
            SessionEvent::Resolved(CaptureResult::Completed { image, display }) => {
                self.session = None;
                self.preview.show(&image);
                self.capture_seq += 1;
                self.working = Some(WorkingCapture {
                    image: Some(image),
                    display,
                });
            }
        }
    }

    /// Queue a destructive pixelation pass over the working bitmap.
    ///
    /// `preview_size` is the viewport the preview collaborator is showing
    /// the bitmap in; regions are in that space. Returns false when there
    /// is no bitmap to redact or a pass is already in flight.
    pub fn apply_redactions(
        &mut self,
        regions: Vec<RedactRegion>,
        preview_size: (f32, f32),
    ) -> bool {
        let Some(working) = self.working.as_mut() else {
            return false;
        };
        let Some(image) = working.image.take() else {
            log::warn!("redaction pass already in flight, ignoring");
            return false;
        };

        self.worker.submit(RedactionJob {
            capture: self.capture_seq,
            image,
            regions,
            preview: preview_size,
            blocks: self.config.pixelation_blocks,
        });
        true
    }

    /// Drain finished redaction passes without blocking
    pub fn poll_redactions(&mut self) {
        while let Some(done) = self.worker.try_recv() {
            self.accept_redaction(done);
        }
    }

    fn accept_redaction(&mut self, done: RedactionDone) {
        if done.capture != self.capture_seq {
            log::debug!("discarding redaction result for a cancelled capture");
            return;
        }
        if let Some(working) = self.working.as_mut() {
            self.preview.show(&done.image);
            working.image = Some(done.image);
        }
    }

    /// Block until no redaction pass is in flight for the working capture
    pub fn wait_redactions(&mut self) {
        while self.working.as_ref().is_some_and(|w| w.image.is_none()) {
            match self.worker.recv() {
                Some(done) => self.accept_redaction(done),
                None => break,
            }
        }
    }

    /// Encode the finished bitmap, upload it, and notify collaborators.
    /// Consumes the working capture; on success the public URL is copied
    /// to the clipboard (when configured) and returned.
    pub fn finish(&mut self) -> anyhow::Result<String> {
        self.wait_redactions();
        let Some(working) = self.working.take() else {
            anyhow::bail!("no finished capture to upload");
        };
        let Some(image) = working.image else {
            anyhow::bail!("working bitmap lost to a dead redaction worker");
        };
        log::debug!(
            "uploading {}x{} capture from display {}",
            image.width(),
            image.height(),
            working.display.id
        );

        let png = encode_png(&image)?;
        self.preview.uploading();

        match self.uploader.upload(&png) {
            Ok(url) => {
                if self.config.copy_url_to_clipboard {
                    self.clipboard.set_text(&url);
                }
                let filename = url.rsplit('/').next().unwrap_or("screenshot.png");
                self.preview.uploaded(&url, filename);
                Ok(url)
            }
            Err(err) => {
                self.preview.error(&err.to_string());
                Err(err)
            }
        }
    }

    /// Synchronously tear down the live session, if any
    pub fn cancel_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cancel();
        }
    }

    /// Drop the working capture. Any in-flight redaction result for it
    /// will be discarded when it surfaces.
    pub fn discard_working(&mut self) {
        if self.working.take().is_some() {
            self.capture_seq += 1;
        }
    }

    /// Suggested upload object key, for uploaders that want one:
    /// `screenshots/<UTC timestamp>-<sequence>.png`
    pub fn suggested_object_key(&mut self) -> String {
        self.upload_seq = self.upload_seq.wrapping_add(1);
        format!(
            "screenshots/{}-{:04x}.png",
            Utc::now().format("%Y%m%d-%H%M%S"),
            self.upload_seq
        )
    }

    #[cfg(test)]
    fn drain_one_blocking(&mut self) {
        if let Some(done) = self.worker.recv() {
            self.accept_redaction(done);
        }
    }
}
