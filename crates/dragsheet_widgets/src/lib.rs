//! dragsheet Widget Library
//!
//! The draggable bottom modal sheet and the small controls its host needs.
//!
//! - [`SheetSize`]: symbolic sheet heights resolved against the live viewport
//! - [`DragGesture`]: drag/tap recognition over raw pointer events
//! - [`DragModal`]: the spring-animated, drag-to-dismiss sheet
//! - [`Button`]: press-animated button with a click callback
//! - [`fraction_progress`]: the clamped interpolation used for the backdrop fade

pub mod button;
pub mod frame;
pub mod gesture;
pub mod modal;
pub mod progress;
pub mod size;
pub mod widget;

pub use button::{Button, ButtonConfig, ButtonFrame, ButtonState};
pub use frame::{
    BackdropNode, ContentNode, HandleNode, ModalFrame, ModalPart, SheetNode,
    CONTENT_VERTICAL_PADDING, HANDLE_GLYPH_SIZE, SHEET_CORNER_RADIUS, SHEET_SHADOW_RADIUS,
};
pub use gesture::{DragGesture, DragState, DragValue, GestureConfig, GestureEvent, VelocityTracker};
pub use modal::{should_dismiss, DragModal, DragModalBuilder, DragModalConfig, ModalTargets};
pub use progress::fraction_progress;
pub use size::SheetSize;
pub use widget::{Widget, WidgetId};
