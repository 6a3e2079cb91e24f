//! Render description of the modal overlay
//!
//! `DragModal::build` produces a `ModalFrame` each frame: plain data with
//! absolute bounds and paint parameters for the four parts of the overlay.
//! Rendering backends draw it in order (backdrop, sheet, handle, content).

use dragsheet_animation::SpringConfig;
use dragsheet_core::{Color, Point, Rect, Size};
use serde::Serialize;

use crate::gesture::DragState;

/// Size of the drag handle glyph
pub const HANDLE_GLYPH_SIZE: f32 = 80.0;
/// Top corner radius of the sheet
pub const SHEET_CORNER_RADIUS: f32 = 10.0;
/// Blur radius of the sheet's drop shadow
pub const SHEET_SHADOW_RADIUS: f32 = 5.0;
/// Padding above and below the content
pub const CONTENT_VERTICAL_PADDING: f32 = 24.0;

/// Addressable parts of the overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalPart {
    Root,
    Backdrop,
    Spacer,
    Sheet,
    Handle,
    Content,
}

/// Full-viewport dimming layer
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BackdropNode {
    pub bounds: Rect,
    /// Fill with `opacity` already applied
    pub color: Color,
    pub opacity: f32,
    /// Only a visible modal's backdrop intercepts input
    pub hit_testable: bool,
}

/// The sliding panel
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SheetNode {
    /// Bounds after the vertical offset is applied
    pub bounds: Rect,
    pub fill: Color,
    pub corner_radius: f32,
    pub shadow_radius: f32,
    /// Current downward displacement from the resting position
    pub offset: f32,
}

/// Drag affordance pinned to the top of the sheet
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HandleNode {
    pub bounds: Rect,
    pub glyph_size: f32,
    pub color: Color,
}

/// Caller-supplied content laid out inside the sheet
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContentNode<C> {
    /// The full sheet-sized frame; drawing is clipped to it when `clip` is set
    pub bounds: Rect,
    /// `bounds` minus the vertical padding
    pub inner: Rect,
    pub vertical_padding: f32,
    pub clip: bool,
    pub view: C,
}

/// One frame of the overlay
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModalFrame<C> {
    pub viewport: Size,
    pub visible: bool,
    pub drag: DragState,
    pub sheet_height: f32,
    pub backdrop: BackdropNode,
    pub sheet: SheetNode,
    pub handle: HandleNode,
    pub content: ContentNode<C>,
    /// Spring the offset and opacity are animated with
    pub spring: SpringConfig,
    pub initial_velocity: f32,
}

impl<C> ModalFrame<C> {
    /// Topmost part under `point`, if any part accepts input there
    pub fn hit_test(&self, point: Point) -> Option<ModalPart> {
        if self.sheet.bounds.contains(point) {
            Some(ModalPart::Sheet)
        } else if self.backdrop.hit_testable && self.backdrop.bounds.contains(point) {
            Some(ModalPart::Backdrop)
        } else {
            None
        }
    }
}
