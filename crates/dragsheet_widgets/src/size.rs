//! Sheet height policy
//!
//! Maps a symbolic size to a concrete height from the viewport's *current*
//! height. Nothing here is cached: the viewport can rotate or resize between
//! frames, so callers resolve on every update.

use dragsheet_core::ViewportMetrics;
use serde::{Deserialize, Serialize};

/// Height of the modal sheet
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetSize {
    /// A quarter of the viewport
    Small,
    /// Half of the viewport (default)
    #[default]
    Regular,
    /// Three quarters of the viewport
    Large,
    /// The whole viewport minus the top safe-area inset
    Fullscreen,
    /// An explicit height in pixels
    Custom(f32),
}

impl SheetSize {
    /// Height for a viewport of `viewport_height` with the given top inset
    pub fn height(&self, viewport_height: f32, top_inset: f32) -> f32 {
        match self {
            SheetSize::Small => viewport_height / 4.0,
            SheetSize::Regular => viewport_height / 2.0,
            SheetSize::Large => (viewport_height / 4.0) * 3.0,
            SheetSize::Fullscreen => viewport_height - top_inset,
            SheetSize::Custom(height) => *height,
        }
    }

    /// Height for the viewport's current metrics
    pub fn resolve(&self, viewport: &dyn ViewportMetrics) -> f32 {
        self.height(viewport.size().height, viewport.top_inset())
    }
}
