//! Drag and tap recognition
//!
//! Turns a raw pointer stream (down, move*, up-or-cancel) into the two
//! gestures the sheet understands:
//!
//! - a **drag**, which starts once the pointer has travelled
//!   `min_drag_distance` from where it went down and reports cumulative
//!   translation plus a velocity-projected end translation on release;
//! - a **tap**, a press released before it turned into a drag.
//!
//! # Recognizer states
//!
//! ```text
//! Idle ──down──▶ Pressed ──move ≥ slop──▶ Dragging
//!   ▲               │ up: Tap                │ move: DragChanged
//!   │               │ cancel                 │ up: DragEnded
//!   └───────────────┴────────────────────────┘ cancel: DragCancelled
//! ```

use dragsheet_core::{Point, PointerEvent, PointerPhase, Vec2};
use serde::Serialize;
use smallvec::SmallVec;

/// Gesture tuning
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Distance the pointer must travel before a press becomes a drag
    pub min_drag_distance: f32,
    /// Per-millisecond velocity retention used to project the end of a flick
    pub deceleration_rate: f32,
    /// Only samples this recent contribute to the release velocity
    pub velocity_window_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_drag_distance: 10.0,
            deceleration_rate: 0.998,
            velocity_window_ms: 100,
        }
    }
}

impl GestureConfig {
    /// Seconds of travel a released velocity projects forward
    pub fn projection_seconds(&self) -> f32 {
        let rate = self.deceleration_rate.clamp(0.0, 0.999_999);
        rate / (1.0 - rate) / 1000.0
    }
}

/// Transient drag state owned by the sheet
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    /// No drag in progress
    #[default]
    Inactive,
    /// A drag is in progress with this cumulative translation
    Dragging { translation: Vec2 },
}

impl DragState {
    /// Cumulative translation, zero when inactive
    pub fn translation(&self) -> Vec2 {
        match self {
            DragState::Inactive => Vec2::ZERO,
            DragState::Dragging { translation } => *translation,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// Snapshot of a drag gesture
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct DragValue {
    /// Where the pointer went down
    pub start_location: Point,
    /// Where the pointer is now
    pub location: Point,
    /// `location - start_location`
    pub translation: Vec2,
    /// Where the drag would come to rest if the pointer kept its momentum
    pub predicted_end_translation: Vec2,
    /// Pointer velocity in pixels per second
    pub velocity: Vec2,
    pub timestamp_ms: u64,
}

impl DragValue {
    /// A drag value with the given vertical translations, for callers that
    /// only care about the dismiss decision
    pub fn vertical(translation: f32, predicted_end: f32) -> Self {
        Self {
            translation: Vec2::new(0.0, translation),
            predicted_end_translation: Vec2::new(0.0, predicted_end),
            location: Point::new(0.0, translation),
            ..Default::default()
        }
    }
}

/// Recognized gesture
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// A drag started or moved
    DragChanged(DragValue),
    /// A drag was released
    DragEnded(DragValue),
    /// A drag was cancelled by the system; no release decision applies
    DragCancelled,
    /// A press was released without dragging
    Tap { location: Point },
}

/// Recognizer phase
#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum RecognizerPhase {
    #[default]
    Idle,
    Pressed {
        start: Point,
    },
    Dragging {
        start: Point,
    },
}

/// Estimates pointer velocity from recent samples
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[(u64, Point); 16]>,
    window_ms: u64,
}

impl VelocityTracker {
    pub fn new(window_ms: u64) -> Self {
        Self {
            samples: SmallVec::new(),
            window_ms,
        }
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn add(&mut self, timestamp_ms: u64, position: Point) {
        let horizon = timestamp_ms.saturating_sub(self.window_ms);
        self.samples.retain(|(t, _)| *t >= horizon);
        self.samples.push((timestamp_ms, position));
    }

    /// Velocity in pixels per second across the sampling window
    pub fn velocity(&self) -> Vec2 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.first(), self.samples.last()) else {
            return Vec2::ZERO;
        };
        if t1 <= t0 {
            return Vec2::ZERO;
        }
        let seconds = (t1 - t0) as f32 / 1000.0;
        (p1 - p0) * (1.0 / seconds)
    }
}

/// Drag/tap recognizer for one pointer
#[derive(Clone, Debug)]
pub struct DragGesture {
    config: GestureConfig,
    phase: RecognizerPhase,
    state: DragState,
    tracker: VelocityTracker,
}

impl DragGesture {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: RecognizerPhase::Idle,
            state: DragState::Inactive,
            tracker: VelocityTracker::new(config.velocity_window_ms),
        }
    }

    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Current drag state
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether a pointer is currently down on this recognizer
    pub fn is_tracking(&self) -> bool {
        !matches!(self.phase, RecognizerPhase::Idle)
    }

    fn reset(&mut self) {
        self.phase = RecognizerPhase::Idle;
        self.state = DragState::Inactive;
        self.tracker.reset();
    }

    fn value(&self, start: Point, event: &PointerEvent) -> DragValue {
        let translation = event.position - start;
        let velocity = self.tracker.velocity();
        DragValue {
            start_location: start,
            location: event.position,
            translation,
            predicted_end_translation: translation + velocity * self.config.projection_seconds(),
            velocity,
            timestamp_ms: event.timestamp_ms,
        }
    }

    /// Feed a pointer event, returning the gesture it completes or updates
    pub fn handle(&mut self, event: &PointerEvent) -> Option<GestureEvent> {
        match (self.phase, event.phase) {
            (_, PointerPhase::Down) => {
                self.reset();
                self.tracker.add(event.timestamp_ms, event.position);
                self.phase = RecognizerPhase::Pressed {
                    start: event.position,
                };
                None
            }

            (RecognizerPhase::Pressed { start }, PointerPhase::Move) => {
                self.tracker.add(event.timestamp_ms, event.position);
                if event.position.distance(start) < self.config.min_drag_distance {
                    return None;
                }
                self.phase = RecognizerPhase::Dragging { start };
                let value = self.value(start, event);
                self.state = DragState::Dragging {
                    translation: value.translation,
                };
                tracing::trace!(dy = value.translation.y, "drag began");
                Some(GestureEvent::DragChanged(value))
            }

            (RecognizerPhase::Dragging { start }, PointerPhase::Move) => {
                self.tracker.add(event.timestamp_ms, event.position);
                let value = self.value(start, event);
                self.state = DragState::Dragging {
                    translation: value.translation,
                };
                Some(GestureEvent::DragChanged(value))
            }

            (RecognizerPhase::Pressed { .. }, PointerPhase::Up) => {
                self.reset();
                Some(GestureEvent::Tap {
                    location: event.position,
                })
            }

            (RecognizerPhase::Dragging { start }, PointerPhase::Up) => {
                self.tracker.add(event.timestamp_ms, event.position);
                let value = self.value(start, event);
                self.reset();
                tracing::trace!(
                    dy = value.translation.y,
                    predicted_dy = value.predicted_end_translation.y,
                    "drag ended"
                );
                Some(GestureEvent::DragEnded(value))
            }

            (RecognizerPhase::Dragging { .. }, PointerPhase::Cancel) => {
                self.reset();
                Some(GestureEvent::DragCancelled)
            }

            (RecognizerPhase::Pressed { .. }, PointerPhase::Cancel) => {
                self.reset();
                None
            }

            (RecognizerPhase::Idle, _) => None,
        }
    }
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
