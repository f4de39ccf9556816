//! Platform capture adapter trait
//!
//! The concrete binding to a window-server or compositor API lives in the
//! embedding shell; the core only depends on this contract.

use crate::domain::Display;

use super::snapshot::Snapshot;

/// Bridge to the platform's display enumeration and capture APIs.
pub trait CaptureAdapter {
    /// Whether the platform has granted screen capture access.
    fn has_permission(&self) -> bool {
        true
    }

    /// Enumerate the attached displays in the current layout.
    fn enumerate_displays(&self) -> anyhow::Result<Vec<Display>>;

    /// Take one immutable snapshot of a display's current contents.
    fn capture_display(&self, display: &Display) -> anyhow::Result<Snapshot>;

    /// Block until the screen is clean of the UI element that triggered
    /// the capture (menu closing, hotkey HUD fading). Called once, before
    /// snapshots are taken and overlays are shown. The default is a no-op
    /// for headless shells and tests.
    fn settle(&self) {}
}
