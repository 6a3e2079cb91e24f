//! Draggable bottom modal sheet
//!
//! The modal is always mounted. Whether it shows is read from a
//! [`Binding<bool>`] that the host owns, and every update maps three inputs
//! to two animated outputs:
//!
//! | visible | drag                | sheet offset    | backdrop opacity                 |
//! |---------|---------------------|-----------------|----------------------------------|
//! | false   | any                 | `sheet_height`  | 0                                |
//! | true    | inactive / `y < 1`  | 0               | `max * (1 - progress(y))`        |
//! | true    | dragging, `y >= 1`  | `y`             | `max * (1 - progress(y))`        |
//!
//! where `progress(y) = fraction_progress(0, sheet_height, y)`. Both outputs
//! are spring-animated through the host's [`AnimationScheduler`].
//!
//! Releasing a drag hides the modal when either the actual or the predicted
//! end translation passes `sheet_height * dismiss_ratio`. Tapping the backdrop
//! always hides it. Nothing here ever sets the binding to `true`.
//!
//! # Example
//!
//! ```rust
//! use dragsheet_animation::AnimationScheduler;
//! use dragsheet_core::{Binding, FixedViewport};
//! use dragsheet_widgets::{DragModal, SheetSize};
//!
//! let scheduler = AnimationScheduler::shared();
//! let is_shown = Binding::new(false);
//!
//! let mut modal = DragModal::builder(is_shown.clone(), || "Hello")
//!     .size(SheetSize::Fullscreen)
//!     .build(&scheduler, FixedViewport::new(390.0, 844.0));
//!
//! is_shown.set(true);
//! modal.refresh();
//! assert_eq!(modal.targets().sheet_offset, 0.0);
//! ```
//!
//! [`AnimationScheduler`]: dragsheet_animation::AnimationScheduler

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dragsheet_animation::{AnimatedValue, SharedAnimationScheduler, SpringConfig};
use dragsheet_core::{
    Binding, Color, EventResponse, PointerEvent, PointerPhase, Rect, Size, SubscriptionId,
    ViewportMetrics,
};
use dragsheet_layout::{LayoutError, LayoutNodeId, LayoutStyle, LayoutTree};
use rustc_hash::FxHashMap;

use crate::frame::{
    BackdropNode, ContentNode, HandleNode, ModalFrame, ModalPart, SheetNode,
    CONTENT_VERTICAL_PADDING, HANDLE_GLYPH_SIZE, SHEET_CORNER_RADIUS, SHEET_SHADOW_RADIUS,
};
use crate::gesture::{DragGesture, DragState, DragValue, GestureConfig, GestureEvent};
use crate::progress::fraction_progress;
use crate::size::SheetSize;
use crate::widget::{Widget, WidgetId};

/// Drags shorter than this leave the sheet at rest
const FOLLOW_THRESHOLD: f32 = 1.0;

/// Appearance and behaviour of a [`DragModal`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragModalConfig {
    /// Sheet fill
    pub background: Color,
    /// Sheet height policy
    pub size: SheetSize,
    /// Spring driving offset and backdrop opacity
    pub spring: SpringConfig,
    /// Relative kick given to a spring that starts from rest
    pub initial_velocity: f32,
    /// Backdrop opacity while shown and not dragged
    pub max_backdrop_opacity: f32,
    /// Fraction of the sheet height a drag must pass to dismiss
    pub dismiss_ratio: f32,
    pub gesture: GestureConfig,
}

impl Default for DragModalConfig {
    fn default() -> Self {
        Self {
            background: Color::gray(0.9),
            size: SheetSize::Regular,
            spring: SpringConfig::interpolating(300.0, 30.0),
            initial_velocity: 10.0,
            max_backdrop_opacity: 0.5,
            dismiss_ratio: 2.0 / 3.0,
            gesture: GestureConfig::default(),
        }
    }
}

/// Where the animated values are heading
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModalTargets {
    pub sheet_offset: f32,
    pub backdrop_opacity: f32,
}

impl ModalTargets {
    /// Targets for the given visibility, drag and sheet height
    pub fn compute(
        visible: bool,
        drag: DragState,
        sheet_height: f32,
        max_backdrop_opacity: f32,
    ) -> Self {
        if !visible {
            return Self {
                sheet_offset: sheet_height,
                backdrop_opacity: 0.0,
            };
        }

        let dy = drag.translation().y;
        let sheet_offset = if drag.is_dragging() && dy >= FOLLOW_THRESHOLD {
            dy
        } else {
            0.0
        };
        Self {
            sheet_offset,
            backdrop_opacity: max_backdrop_opacity
                * fraction_progress(0.0, sheet_height, dy, true),
        }
    }
}

/// Whether releasing `drag` should dismiss a sheet of `sheet_height`
pub fn should_dismiss(drag: &DragValue, sheet_height: f32, dismiss_ratio: f32) -> bool {
    let threshold = sheet_height * dismiss_ratio;
    drag.predicted_end_translation.y > threshold || drag.translation.y > threshold
}

/// Builder for a [`DragModal`]
pub struct DragModalBuilder<C> {
    visibility: Binding<bool>,
    content: Box<dyn Fn() -> C + Send>,
    config: DragModalConfig,
}

impl<C> DragModalBuilder<C> {
    /// Set the sheet fill
    pub fn background(mut self, color: impl Into<Color>) -> Self {
        self.config.background = color.into();
        self
    }

    /// Set the height policy
    pub fn size(mut self, size: SheetSize) -> Self {
        self.config.size = size;
        self
    }

    /// Set the spring and its relative initial velocity
    pub fn spring(mut self, spring: SpringConfig, initial_velocity: f32) -> Self {
        self.config.spring = spring;
        self.config.initial_velocity = initial_velocity;
        self
    }

    /// Set the fully shown backdrop opacity
    pub fn max_backdrop_opacity(mut self, opacity: f32) -> Self {
        self.config.max_backdrop_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Set the dismiss threshold as a fraction of the sheet height
    pub fn dismiss_ratio(mut self, ratio: f32) -> Self {
        self.config.dismiss_ratio = ratio;
        self
    }

    pub fn gesture(mut self, gesture: GestureConfig) -> Self {
        self.config.gesture = gesture;
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: DragModalConfig) -> Self {
        self.config = config;
        self
    }

    /// Mount the modal, animating through `scheduler`
    pub fn build<V>(self, scheduler: &SharedAnimationScheduler, viewport: V) -> DragModal<C>
    where
        V: ViewportMetrics + Send + 'static,
    {
        let config = self.config;
        DragModal::mount(self, viewport, |initial| {
            AnimatedValue::new(scheduler, config.spring, config.initial_velocity, initial)
        })
    }

    /// Mount the modal without a scheduler; every change snaps
    pub fn build_detached<V>(self, viewport: V) -> DragModal<C>
    where
        V: ViewportMetrics + Send + 'static,
    {
        let spring = self.config.spring;
        DragModal::mount(self, viewport, |initial| {
            AnimatedValue::detached(spring, initial)
        })
    }
}

/// Inputs a built frame depends on besides visibility
#[derive(Clone, Copy, Debug, PartialEq)]
struct FrameKey {
    viewport: Size,
    drag: DragState,
    offset: f32,
    opacity: f32,
}

/// The draggable modal sheet widget
pub struct DragModal<C> {
    id: WidgetId,
    visibility: Binding<bool>,
    subscription: SubscriptionId,
    dirty: Arc<AtomicBool>,
    config: DragModalConfig,
    content: Box<dyn Fn() -> C + Send>,
    viewport: Box<dyn ViewportMetrics + Send>,
    gesture: DragGesture,
    /// Part that received the current pointer-down
    capture: Option<ModalPart>,
    drag: DragState,
    offset: AnimatedValue,
    backdrop_opacity: AnimatedValue,
    layout: LayoutTree,
    nodes: FxHashMap<ModalPart, LayoutNodeId>,
    built: Option<FrameKey>,
}

impl<C> DragModal<C> {
    /// Start building a modal over `visibility` showing `content`
    pub fn builder<F>(visibility: Binding<bool>, content: F) -> DragModalBuilder<C>
    where
        F: Fn() -> C + Send + 'static,
    {
        DragModalBuilder {
            visibility,
            content: Box::new(content),
            config: DragModalConfig::default(),
        }
    }

    fn mount<V, A>(builder: DragModalBuilder<C>, viewport: V, mut animated: A) -> Self
    where
        V: ViewportMetrics + Send + 'static,
        A: FnMut(f32) -> AnimatedValue,
    {
        let DragModalBuilder {
            visibility,
            content,
            config,
        } = builder;

        let dirty = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&dirty);
        let subscription = visibility.subscribe(move |shown| {
            tracing::debug!(shown, "modal visibility changed");
            flag.store(true, Ordering::Release);
        });

        let sheet_height = config.size.resolve(&viewport);
        let initial = ModalTargets::compute(
            visibility.get(),
            DragState::Inactive,
            sheet_height,
            config.max_backdrop_opacity,
        );

        Self {
            id: WidgetId::next(),
            visibility,
            subscription,
            dirty,
            config,
            content,
            viewport: Box::new(viewport),
            gesture: DragGesture::new(config.gesture),
            capture: None,
            drag: DragState::Inactive,
            offset: animated(initial.sheet_offset),
            backdrop_opacity: animated(initial.backdrop_opacity),
            layout: LayoutTree::new(),
            nodes: FxHashMap::default(),
            built: None,
        }
    }

    pub fn config(&self) -> &DragModalConfig {
        &self.config
    }

    /// The binding this modal reads and dismisses through
    pub fn visibility(&self) -> &Binding<bool> {
        &self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.get()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Sheet height for the viewport as it is now
    pub fn sheet_height(&self) -> f32 {
        self.config.size.resolve(self.viewport.as_ref())
    }

    /// Translation a released drag must exceed to dismiss
    pub fn dismiss_threshold(&self) -> f32 {
        self.sheet_height() * self.config.dismiss_ratio
    }

    /// Targets for the current state
    pub fn targets(&self) -> ModalTargets {
        ModalTargets::compute(
            self.is_visible(),
            self.drag,
            self.sheet_height(),
            self.config.max_backdrop_opacity,
        )
    }

    /// Current (sampled) sheet offset
    pub fn sheet_offset(&self) -> f32 {
        self.offset.value()
    }

    /// Current (sampled) backdrop opacity
    pub fn backdrop_opacity(&self) -> f32 {
        self.backdrop_opacity.value()
    }

    /// Whether both animated values have reached their targets
    pub fn is_settled(&self) -> bool {
        !self.offset.is_animating() && !self.backdrop_opacity.is_animating()
    }

    fn frame_key(&self) -> FrameKey {
        FrameKey {
            viewport: self.viewport.size(),
            drag: self.drag,
            offset: self.offset.value(),
            opacity: self.backdrop_opacity.value(),
        }
    }

    /// Whether the next frame differs from the last one built.
    ///
    /// Visibility changes arrive through the binding subscription, so a
    /// write made between frames is seen here before any refresh.
    pub fn needs_redraw(&self) -> bool {
        self.dirty.load(Ordering::Acquire) || self.built != Some(self.frame_key())
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// A drag on the sheet started or moved
    pub fn on_drag_changed(&mut self, value: &DragValue) {
        tracing::trace!(dy = value.translation.y, "sheet dragged");
        self.drag = DragState::Dragging {
            translation: value.translation,
        };
        self.mark_dirty();
    }

    /// A drag on the sheet was released
    pub fn on_drag_ended(&mut self, value: &DragValue) {
        self.drag = DragState::Inactive;
        self.mark_dirty();

        let dismiss = should_dismiss(value, self.sheet_height(), self.config.dismiss_ratio);
        tracing::debug!(
            dy = value.translation.y,
            predicted_dy = value.predicted_end_translation.y,
            threshold = self.dismiss_threshold(),
            dismiss,
            "drag released"
        );
        if dismiss {
            self.visibility.set(false);
        }
    }

    /// A drag on the sheet was cancelled by the system
    pub fn on_drag_cancelled(&mut self) {
        tracing::trace!("sheet drag cancelled");
        self.drag = DragState::Inactive;
        self.mark_dirty();
    }

    /// The backdrop was tapped
    pub fn on_backdrop_tap(&mut self) {
        tracing::debug!("backdrop tapped");
        self.visibility.set(false);
        self.mark_dirty();
    }

    /// Sheet bounds at the current animated offset
    pub fn sheet_rect(&self) -> Rect {
        let size = self.viewport.size();
        let sheet_height = self.sheet_height();
        let top = (size.height - sheet_height).max(0.0);
        Rect::new(0.0, top + self.offset.value(), size.width, sheet_height)
    }

    /// Topmost part accepting input at `event`'s position
    fn hit_test(&self, event: &PointerEvent) -> Option<ModalPart> {
        let size = self.viewport.size();
        if self.sheet_rect().contains(event.position) {
            Some(ModalPart::Sheet)
        } else if self.is_visible() && size.to_rect().contains(event.position) {
            Some(ModalPart::Backdrop)
        } else {
            None
        }
    }

    /// Recompute targets and retarget the springs
    pub fn refresh(&mut self) {
        let targets = self.targets();
        self.offset.animate_to(targets.sheet_offset);
        self.backdrop_opacity.animate_to(targets.backdrop_opacity);
        self.offset.sample();
        self.backdrop_opacity.sample();
    }

    fn node(&self, part: ModalPart) -> Result<LayoutNodeId, LayoutError> {
        self.nodes.get(&part).copied().ok_or(LayoutError::UnknownNode)
    }

    fn ensure_layout(
        &mut self,
        width: f32,
        height: f32,
        sheet_height: f32,
    ) -> Result<(), LayoutError> {
        if let (Ok(root), Ok(sheet)) = (self.node(ModalPart::Root), self.node(ModalPart::Sheet)) {
            self.layout.set_style(root, LayoutStyle::fixed_column(width, height))?;
            self.layout.set_style(sheet, LayoutStyle::full_width_height(sheet_height))?;
            return Ok(());
        }

        let layout = &mut self.layout;
        let root = layout.create_node(LayoutStyle::fixed_column(width, height))?;
        let backdrop = layout.create_child(root, LayoutStyle::absolute_fill(0.0))?;
        let spacer = layout.create_child(root, LayoutStyle::spacer())?;
        let sheet = layout.create_child(root, LayoutStyle::full_width_height(sheet_height))?;
        let handle = layout.create_child(sheet, LayoutStyle::absolute_top(HANDLE_GLYPH_SIZE))?;
        let content = layout.create_child(
            sheet,
            LayoutStyle::absolute_fill(CONTENT_VERTICAL_PADDING),
        )?;

        self.nodes.extend([
            (ModalPart::Root, root),
            (ModalPart::Backdrop, backdrop),
            (ModalPart::Spacer, spacer),
            (ModalPart::Sheet, sheet),
            (ModalPart::Handle, handle),
            (ModalPart::Content, content),
        ]);
        tracing::debug!(nodes = self.layout.len(), "modal layout created");
        Ok(())
    }

    /// Lay out and describe the current frame
    pub fn build(&mut self) -> Result<ModalFrame<C>, LayoutError> {
        let viewport = self.viewport.size();
        let sheet_height = self.sheet_height();
        let visible = self.is_visible();

        self.ensure_layout(viewport.width, viewport.height, sheet_height)?;
        let root = self.node(ModalPart::Root)?;
        self.layout.compute_layout(root, viewport.width, viewport.height)?;

        let offset = self.offset.value();
        let opacity = self.backdrop_opacity.value();

        let root_bounds = self.layout.bounds(root, None)?;
        let backdrop_bounds = self
            .layout
            .bounds(self.node(ModalPart::Backdrop)?, Some(root_bounds))?;
        let sheet_bounds = self
            .layout
            .bounds(self.node(ModalPart::Sheet)?, Some(root_bounds))?
            .translate_y(offset);
        let handle_bounds = self
            .layout
            .bounds(self.node(ModalPart::Handle)?, Some(sheet_bounds))?;
        let content_bounds = self
            .layout
            .bounds(self.node(ModalPart::Content)?, Some(sheet_bounds))?;

        let inner_height = (content_bounds.height - 2.0 * CONTENT_VERTICAL_PADDING).max(0.0);
        let inner = Rect::new(
            content_bounds.x,
            content_bounds.y + CONTENT_VERTICAL_PADDING,
            content_bounds.width,
            inner_height,
        );

        self.dirty.store(false, Ordering::Release);
        self.built = Some(self.frame_key());
        tracing::trace!(visible, offset, opacity, "modal frame built");

        Ok(ModalFrame {
            viewport,
            visible,
            drag: self.drag,
            sheet_height,
            backdrop: BackdropNode {
                bounds: backdrop_bounds.to_rect(),
                color: Color::BLACK.with_alpha(opacity),
                opacity,
                hit_testable: visible,
            },
            sheet: SheetNode {
                bounds: sheet_bounds.to_rect(),
                fill: self.config.background,
                corner_radius: SHEET_CORNER_RADIUS,
                shadow_radius: SHEET_SHADOW_RADIUS,
                offset,
            },
            handle: HandleNode {
                bounds: handle_bounds.to_rect(),
                glyph_size: HANDLE_GLYPH_SIZE,
                color: Color::DARK_GRAY,
            },
            content: ContentNode {
                bounds: content_bounds.to_rect(),
                inner,
                vertical_padding: CONTENT_VERTICAL_PADDING,
                clip: true,
                view: (self.content)(),
            },
            spring: self.config.spring,
            initial_velocity: self.config.initial_velocity,
        })
    }
}

impl<C> Widget for DragModal<C> {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn handle_event(&mut self, event: &PointerEvent) -> EventResponse {
        if event.phase == PointerPhase::Down {
            // A new press restarts the recognizer, so no earlier drag survives it
            if self.drag.is_dragging() {
                self.on_drag_cancelled();
            }
            self.capture = self.hit_test(event);
        }
        let Some(part) = self.capture else {
            return EventResponse::Ignored;
        };

        let recognized = self.gesture.handle(event);
        if event.is_terminal() {
            self.capture = None;
        }

        match (part, recognized) {
            (ModalPart::Sheet, Some(GestureEvent::DragChanged(value))) => {
                self.on_drag_changed(&value)
            }
            (ModalPart::Sheet, Some(GestureEvent::DragEnded(value))) => {
                self.on_drag_ended(&value)
            }
            (ModalPart::Sheet, Some(GestureEvent::DragCancelled)) => self.on_drag_cancelled(),
            (ModalPart::Backdrop, Some(GestureEvent::Tap { .. })) => self.on_backdrop_tap(),
            _ => {}
        }
        if !self.gesture.is_tracking() && self.drag.is_dragging() {
            self.on_drag_cancelled();
        }
        EventResponse::Handled
    }

    fn update(&mut self, _dt: f32) {
        self.refresh();
    }
}

impl<C> Drop for DragModal<C> {
    fn drop(&mut self) {
        self.visibility.unsubscribe(self.subscription);
    }
}

impl<C> std::fmt::Debug for DragModal<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragModal")
            .field("id", &self.id)
            .field("visible", &self.is_visible())
            .field("drag", &self.drag)
            .field("offset", &self.offset)
            .field("backdrop_opacity", &self.backdrop_opacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragsheet_core::{FixedViewport, Vec2};

    const MAX: f32 = 0.5;

    fn dragging(dy: f32) -> DragState {
        DragState::Dragging {
            translation: Vec2::new(0.0, dy),
        }
    }

    #[test]
    fn test_hidden_targets_ignore_drag() {
        for drag in [DragState::Inactive, dragging(250.0), dragging(-40.0)] {
            let targets = ModalTargets::compute(false, drag, 600.0, MAX);
            assert_eq!(targets.sheet_offset, 600.0);
            assert_eq!(targets.backdrop_opacity, 0.0);
        }
    }

    #[test]
    fn test_shown_at_rest() {
        let targets = ModalTargets::compute(true, DragState::Inactive, 600.0, MAX);
        assert_eq!(targets.sheet_offset, 0.0);
        assert_eq!(targets.backdrop_opacity, 0.5);
    }

    #[test]
    fn test_drag_follow_threshold() {
        assert_eq!(ModalTargets::compute(true, dragging(0.5), 600.0, MAX).sheet_offset, 0.0);
        assert_eq!(ModalTargets::compute(true, dragging(1.0), 600.0, MAX).sheet_offset, 1.0);
        assert_eq!(ModalTargets::compute(true, dragging(-30.0), 600.0, MAX).sheet_offset, 0.0);
        assert_eq!(
            ModalTargets::compute(true, dragging(150.0), 600.0, MAX).sheet_offset,
            150.0
        );
    }

    #[test]
    fn test_backdrop_fades_with_drag() {
        let half = ModalTargets::compute(true, dragging(300.0), 600.0, MAX);
        assert_eq!(half.backdrop_opacity, 0.25);

        let past = ModalTargets::compute(true, dragging(900.0), 600.0, MAX);
        assert_eq!(past.backdrop_opacity, 0.0);

        let upward = ModalTargets::compute(true, dragging(-100.0), 600.0, MAX);
        assert_eq!(upward.backdrop_opacity, 0.5);
    }

    #[test]
    fn test_dismiss_decision() {
        let ratio = 2.0 / 3.0;
        assert!(should_dismiss(&DragValue::vertical(450.0, 450.0), 600.0, ratio));
        assert!(!should_dismiss(&DragValue::vertical(300.0, 300.0), 600.0, ratio));
        assert!(should_dismiss(&DragValue::vertical(100.0, 500.0), 600.0, ratio));
        assert!(!should_dismiss(&DragValue::vertical(400.0, 400.0), 600.0, ratio));
    }

    #[test]
    fn test_drag_end_writes_binding_only_on_dismiss() {
        let shown = Binding::new(true);
        let mut modal = DragModal::builder(shown.clone(), || ())
            .size(SheetSize::Custom(600.0))
            .build_detached(FixedViewport::new(390.0, 844.0));

        modal.on_drag_changed(&DragValue::vertical(300.0, 300.0));
        assert!(modal.drag_state().is_dragging());
        modal.on_drag_ended(&DragValue::vertical(300.0, 300.0));
        assert!(shown.get());
        assert_eq!(modal.drag_state(), DragState::Inactive);

        modal.on_drag_ended(&DragValue::vertical(450.0, 450.0));
        assert!(!shown.get());
    }

    #[test]
    fn test_cancel_never_dismisses() {
        let shown = Binding::new(true);
        let mut modal = DragModal::builder(shown.clone(), || ())
            .size(SheetSize::Custom(600.0))
            .build_detached(FixedViewport::new(390.0, 844.0));

        modal.on_drag_changed(&DragValue::vertical(590.0, 2000.0));
        modal.on_drag_cancelled();
        assert!(shown.get());
        assert_eq!(modal.drag_state(), DragState::Inactive);
    }

    #[test]
    fn test_mount_snaps_to_initial_targets() {
        let shown = Binding::new(false);
        let modal = DragModal::builder(shown, || ())
            .size(SheetSize::Regular)
            .build_detached(FixedViewport::new(390.0, 844.0));

        assert_eq!(modal.sheet_offset(), 422.0);
        assert_eq!(modal.backdrop_opacity(), 0.0);
        assert!(modal.is_settled());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let shown = Binding::new(false);
        let modal = DragModal::builder(shown.clone(), || ()).build_detached(FixedViewport::new(
            390.0, 844.0,
        ));
        assert_eq!(shown.observer_count(), 1);
        drop(modal);
        assert_eq!(shown.observer_count(), 0);
    }
}
