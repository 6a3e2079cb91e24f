//! Computed element bounds

use dragsheet_core::Rect;
use taffy::Layout;

/// Computed layout bounds for an element after layout computation
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementBounds {
    /// X position in viewport coordinates
    pub x: f32,
    /// Y position in viewport coordinates
    pub y: f32,
    /// Computed width
    pub width: f32,
    /// Computed height
    pub height: f32,
}

impl ElementBounds {
    /// Create bounds from a Taffy Layout with parent offset
    pub fn from_layout(layout: &Layout, parent_offset: (f32, f32)) -> Self {
        Self {
            x: parent_offset.0 + layout.location.x,
            y: parent_offset.1 + layout.location.y,
            width: layout.size.width,
            height: layout.size.height,
        }
    }

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shift the bounds vertically
    pub fn translate_y(self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }

    /// Convert to a dragsheet_core Rect
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl From<ElementBounds> for Rect {
    fn from(bounds: ElementBounds) -> Self {
        bounds.to_rect()
    }
}
