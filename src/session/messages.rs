//! Input and notification events for a capture session
//!
//! These events form the decoupled interface between the shell's event
//! loop and the session. The shell translates raw pointer/keyboard input
//! into these types; the session answers with notifications.

use crate::domain::{CaptureResult, Point};

/// Pointer activity on one overlay surface, in that surface's local
/// logical coordinates
#[derive(Clone, Copy, Debug)]
pub enum PointerEvent {
    /// Pointer moved with no button held
    Moved(Point),
    /// Primary button pressed
    Pressed(Point),
    /// Pointer moved with the button held
    Dragged(Point),
    /// Primary button released
    Released(Point),
}

/// Keyboard activity routed to the session
#[derive(Clone, Copy, Debug)]
pub enum KeyEvent {
    /// Cancel the entire session
    Escape,
    /// Copy the last-sampled hex color and cancel the session
    CopyColor,
}

/// All input a session accepts
#[derive(Clone, Copy, Debug)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
}

/// Notifications a session emits while handling input
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A hex color string is ready for the clipboard collaborator
    ColorCopied(String),
    /// The session reached its single terminal outcome
    Resolved(CaptureResult),
}

// Convenience constructors

impl InputEvent {
    pub fn moved(x: f32, y: f32) -> Self {
        Self::Pointer(PointerEvent::Moved(Point::new(x, y)))
    }

    pub fn pressed(x: f32, y: f32) -> Self {
        Self::Pointer(PointerEvent::Pressed(Point::new(x, y)))
    }

    pub fn dragged(x: f32, y: f32) -> Self {
        Self::Pointer(PointerEvent::Dragged(Point::new(x, y)))
    }

    pub fn released(x: f32, y: f32) -> Self {
        Self::Pointer(PointerEvent::Released(Point::new(x, y)))
    }

    pub fn escape() -> Self {
        Self::Key(KeyEvent::Escape)
    }

    pub fn copy_color() -> Self {
        Self::Key(KeyEvent::CopyColor)
    }
}
