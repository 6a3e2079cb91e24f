//! Pointer events
//!
//! Raw pointer input as delivered by the platform. Gesture recognition
//! (drag vs. tap, velocity, predicted end) is layered on top of these in
//! `dragsheet_widgets::gesture`.

use crate::geometry::Point;

/// Phase of a pointer event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Pointer pressed (touch began / mouse button down)
    Down,
    /// Pointer moved while pressed
    Move,
    /// Pointer released
    Up,
    /// Gesture cancelled by the system (e.g. an incoming call)
    Cancel,
}

/// A pointer event with position and timestamp
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Position in viewport coordinates
    pub position: Point,
    /// Milliseconds since an arbitrary, monotonic epoch
    pub timestamp_ms: u64,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self {
            phase,
            position: Point::new(x, y),
            timestamp_ms,
        }
    }

    pub fn down(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Down, x, y, timestamp_ms)
    }

    pub fn moved(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Move, x, y, timestamp_ms)
    }

    pub fn up(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Up, x, y, timestamp_ms)
    }

    pub fn cancel(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Cancel, x, y, timestamp_ms)
    }

    /// Whether this event ends the current gesture
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, PointerPhase::Up | PointerPhase::Cancel)
    }
}

/// How a widget responded to an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventResponse {
    /// The widget consumed the event; it should not propagate further
    Handled,
    /// The widget did not want the event; offer it to the next widget
    Ignored,
}

impl EventResponse {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResponse::Handled)
    }
}
