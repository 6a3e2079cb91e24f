//! Button widget with press feedback
//!
//! The Button widget provides:
//! - Visual states: idle, pressed
//! - Spring-animated press scale
//! - A click callback fired when a press is released inside the button

use dragsheet_animation::{Spring, SpringConfig};
use dragsheet_core::{Color, EventResponse, PointerEvent, PointerPhase, Rect};
use serde::Serialize;

use crate::widget::{Widget, WidgetId};

/// Button visual state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    #[default]
    Idle,
    Pressed,
}

/// Button configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonConfig {
    /// Button label text
    pub label: String,
    /// Base background color
    pub bg_color: Color,
    /// Pressed background color
    pub pressed_color: Color,
    /// Text color
    pub text_color: Color,
    /// Font size
    pub font_size: f32,
    /// Corner radius
    pub corner_radius: f32,
    /// Scale when pressed
    pub pressed_scale: f32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            bg_color: Color::TRANSPARENT,
            pressed_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            text_color: Color::rgb(0.0, 0.478, 1.0),
            font_size: 17.0,
            corner_radius: 8.0,
            pressed_scale: 0.97,
        }
    }
}

impl ButtonConfig {
    /// Create a new button config with a label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }
}

/// Render description of a button
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ButtonFrame {
    pub bounds: Rect,
    pub label: String,
    pub state: ButtonState,
    pub scale: f32,
    pub bg: Color,
    pub text_color: Color,
    pub font_size: f32,
    pub corner_radius: f32,
}

/// Button widget
pub struct Button {
    id: WidgetId,
    config: ButtonConfig,
    bounds: Rect,
    state: ButtonState,
    scale_spring: Spring,
    on_click: Option<Box<dyn FnMut() + Send>>,
}

impl Button {
    /// Create a new button
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_config(ButtonConfig::new(label))
    }

    /// Create a button with custom config
    pub fn with_config(config: ButtonConfig) -> Self {
        Self {
            id: WidgetId::next(),
            config,
            bounds: Rect::ZERO,
            state: ButtonState::Idle,
            scale_spring: Spring::new(SpringConfig::snappy(), 1.0),
            on_click: None,
        }
    }

    /// Set the click callback
    pub fn on_click<F: FnMut() + Send + 'static>(mut self, callback: F) -> Self {
        self.on_click = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Current press scale
    pub fn scale(&self) -> f32 {
        self.scale_spring.value()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Place the button (the host lays it out)
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn set_state(&mut self, state: ButtonState) {
        self.state = state;
        let target = match state {
            ButtonState::Idle => 1.0,
            ButtonState::Pressed => self.config.pressed_scale,
        };
        self.scale_spring.set_target(target);
    }

    fn click(&mut self) {
        tracing::debug!(label = %self.config.label, "button clicked");
        if let Some(ref mut callback) = self.on_click {
            callback();
        }
    }

    /// Build the button's frame description
    pub fn build(&self) -> ButtonFrame {
        let bg = match self.state {
            ButtonState::Idle => self.config.bg_color,
            ButtonState::Pressed => self.config.pressed_color,
        };
        ButtonFrame {
            bounds: self.bounds,
            label: self.config.label.clone(),
            state: self.state,
            scale: self.scale(),
            bg,
            text_color: self.config.text_color,
            font_size: self.config.font_size,
            corner_radius: self.config.corner_radius,
        }
    }
}

impl Widget for Button {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn handle_event(&mut self, event: &PointerEvent) -> EventResponse {
        let inside = self.bounds.contains(event.position);
        match (self.state, event.phase) {
            (ButtonState::Idle, PointerPhase::Down) if inside => {
                self.set_state(ButtonState::Pressed);
                EventResponse::Handled
            }
            (ButtonState::Pressed, PointerPhase::Move) => {
                if !inside {
                    self.set_state(ButtonState::Idle);
                }
                EventResponse::Handled
            }
            (ButtonState::Pressed, PointerPhase::Up) => {
                self.set_state(ButtonState::Idle);
                if inside {
                    self.click();
                }
                EventResponse::Handled
            }
            (ButtonState::Pressed, PointerPhase::Cancel) => {
                self.set_state(ButtonState::Idle);
                EventResponse::Handled
            }
            _ => EventResponse::Ignored,
        }
    }

    fn update(&mut self, dt: f32) {
        self.scale_spring.step(dt);
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("id", &self.id)
            .field("label", &self.config.label)
            .field("state", &self.state)
            .field("bounds", &self.bounds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counted_button() -> (Button, Arc<AtomicUsize>) {
        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = clicks.clone();
        let mut button = Button::new("Show Modal").on_click(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        button.set_bounds(Rect::new(100.0, 400.0, 190.0, 44.0));
        (button, clicks)
    }

    #[test]
    fn test_click_inside() {
        let (mut button, clicks) = counted_button();
        assert!(button.handle_event(&PointerEvent::down(150.0, 420.0, 0)).is_handled());
        assert_eq!(button.state(), ButtonState::Pressed);
        button.handle_event(&PointerEvent::up(150.0, 420.0, 50));
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
        assert_eq!(button.state(), ButtonState::Idle);
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let (mut button, clicks) = counted_button();
        let response = button.handle_event(&PointerEvent::down(10.0, 10.0, 0));
        assert_eq!(response, EventResponse::Ignored);
        button.handle_event(&PointerEvent::up(10.0, 10.0, 50));
        assert_eq!(clicks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_leaving_cancels_click() {
        let (mut button, clicks) = counted_button();
        button.handle_event(&PointerEvent::down(150.0, 420.0, 0));
        button.handle_event(&PointerEvent::moved(150.0, 600.0, 16));
        assert_eq!(button.state(), ButtonState::Idle);
        button.handle_event(&PointerEvent::up(150.0, 420.0, 32));
        assert_eq!(clicks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_press_scale_springs_back() {
        let (mut button, _) = counted_button();
        button.handle_event(&PointerEvent::down(150.0, 420.0, 0));
        for _ in 0..10 {
            button.update(1.0 / 60.0);
        }
        assert!(button.scale() < 1.0);

        button.handle_event(&PointerEvent::up(150.0, 420.0, 200));
        for _ in 0..120 {
            button.update(1.0 / 60.0);
        }
        assert!((button.scale() - 1.0).abs() < 0.001);
    }
}
