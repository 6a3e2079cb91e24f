//! Demo host screen
//!
//! A full-screen teal view with a "Show Modal" button and a fullscreen drag
//! modal on top. The host owns `is_shown`; the button toggles it and the
//! modal dismisses through its clone.

use dragsheet_animation::{AnimationScheduler, SharedAnimationScheduler};
use dragsheet_core::{
    Binding, Color, EventResponse, PointerEvent, PointerPhase, Rect, SharedViewport, Size,
    ViewportMetrics,
};
use dragsheet_layout::LayoutError;
use dragsheet_widgets::{Button, ButtonFrame, DragModal, ModalFrame, Widget};
use serde::Serialize;

use crate::config::AppConfig;

/// Label of the button that toggles the modal
pub const SHOW_MODAL_LABEL: &str = "Show Modal";
/// Text shown inside the sheet
pub const CONTENT_TEXT: &str = "Here goes my content view.";
/// Host background
pub const HOST_BACKGROUND: Color = Color::rgb(0.2186, 0.7710, 0.7871);

const BUTTON_SIZE: Size = Size::new(120.0, 44.0);

/// Content rendered inside the sheet
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextContent {
    pub text: String,
    pub font_size: f32,
}

/// Which widget the current pointer sequence belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PointerTarget {
    Modal,
    Button,
}

/// Everything the host draws in one frame, back to front
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HostFrame {
    pub viewport: Size,
    pub background: Color,
    pub button: ButtonFrame,
    pub modal: ModalFrame<TextContent>,
}

/// Observable host state for diagnostics
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HostSnapshot {
    pub visible: bool,
    pub dragging: bool,
    pub sheet_offset: f32,
    pub backdrop_opacity: f32,
    pub sheet_height: f32,
    pub settled: bool,
}

/// The demo screen
pub struct ContentView {
    is_shown: Binding<bool>,
    viewport: SharedViewport,
    scheduler: SharedAnimationScheduler,
    button: Button,
    modal: DragModal<TextContent>,
    /// Last modal frame, reused while nothing it depends on changed
    modal_frame: Option<ModalFrame<TextContent>>,
    pointer_target: Option<PointerTarget>,
}

impl ContentView {
    /// Mount the screen from configuration
    pub fn new(config: &AppConfig) -> Self {
        let is_shown = Binding::new(false);
        let viewport = SharedViewport::new(config.viewport());
        let scheduler = AnimationScheduler::shared();

        let toggle = is_shown.clone();
        let mut button = Button::new(SHOW_MODAL_LABEL).on_click(move || {
            toggle.toggle();
        });
        button.set_bounds(centered(viewport.size(), BUTTON_SIZE));

        let modal = DragModal::builder(is_shown.clone(), || TextContent {
            text: CONTENT_TEXT.to_string(),
            font_size: 17.0,
        })
        .config(config.modal_config())
        .build(&scheduler, viewport.clone());

        tracing::debug!(
            width = viewport.size().width,
            height = viewport.size().height,
            "host mounted"
        );

        Self {
            is_shown,
            viewport,
            scheduler,
            button,
            modal,
            modal_frame: None,
            pointer_target: None,
        }
    }

    pub fn is_shown(&self) -> &Binding<bool> {
        &self.is_shown
    }

    pub fn viewport(&self) -> &SharedViewport {
        &self.viewport
    }

    pub fn scheduler(&self) -> &SharedAnimationScheduler {
        &self.scheduler
    }

    pub fn button(&self) -> &Button {
        &self.button
    }

    pub fn modal(&self) -> &DragModal<TextContent> {
        &self.modal
    }

    /// Flip the modal's visibility, as the button does
    pub fn toggle(&mut self) {
        self.is_shown.toggle();
    }

    /// Resize the viewport (rotation, window resize)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        self.button.set_bounds(centered(self.viewport.size(), BUTTON_SIZE));
    }

    /// Route a pointer event to the topmost widget that wants it.
    ///
    /// A pointer-down picks the receiver (the modal first, it sits on top);
    /// the rest of the sequence goes to that receiver only.
    pub fn dispatch(&mut self, event: &PointerEvent) -> EventResponse {
        if event.phase == PointerPhase::Down {
            self.pointer_target = None;
            if self.modal.handle_event(event).is_handled() {
                self.pointer_target = Some(PointerTarget::Modal);
            } else if self.button.handle_event(event).is_handled() {
                self.pointer_target = Some(PointerTarget::Button);
            }
            return match self.pointer_target {
                Some(_) => EventResponse::Handled,
                None => EventResponse::Ignored,
            };
        }

        let response = match self.pointer_target {
            Some(PointerTarget::Modal) => self.modal.handle_event(event),
            Some(PointerTarget::Button) => self.button.handle_event(event),
            None => EventResponse::Ignored,
        };
        if event.is_terminal() {
            self.pointer_target = None;
        }
        response
    }

    /// Advance one frame of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.scheduler
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .step(dt);
        self.button.update(dt);
        self.modal.update(dt);
    }

    pub fn snapshot(&self) -> HostSnapshot {
        HostSnapshot {
            visible: self.modal.is_visible(),
            dragging: self.modal.drag_state().is_dragging(),
            sheet_offset: self.modal.sheet_offset(),
            backdrop_opacity: self.modal.backdrop_opacity(),
            sheet_height: self.modal.sheet_height(),
            settled: self.modal.is_settled(),
        }
    }

    /// Describe the current frame.
    ///
    /// The modal is only laid out again when it reports a change.
    pub fn frame(&mut self) -> Result<HostFrame, LayoutError> {
        let modal = match self.modal_frame.take() {
            Some(cached) if !self.modal.needs_redraw() => cached,
            _ => {
                tracing::trace!("modal frame rebuilt");
                self.modal.build()?
            }
        };
        self.modal_frame = Some(modal.clone());

        Ok(HostFrame {
            viewport: self.viewport.size(),
            background: HOST_BACKGROUND,
            button: self.button.build(),
            modal,
        })
    }
}

fn centered(viewport: Size, size: Size) -> Rect {
    Rect::new(
        (viewport.width - size.width) / 2.0,
        (viewport.height - size.height) / 2.0,
        size.width,
        size.height,
    )
}
