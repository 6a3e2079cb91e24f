//! Layout style helpers

pub use taffy::prelude::*;

/// Helper to create the styles the overlay is built from
pub struct LayoutStyle;

impl LayoutStyle {
    /// A fixed-size flex column (the viewport root)
    pub fn fixed_column(width: f32, height: f32) -> Style {
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            size: Size {
                width: Dimension::Length(width),
                height: Dimension::Length(height),
            },
            ..Default::default()
        }
    }

    /// A flexible spacer that takes all remaining main-axis space
    pub fn spacer() -> Style {
        Style {
            flex_grow: 1.0,
            flex_shrink: 1.0,
            ..Default::default()
        }
    }

    /// Full parent width with a fixed height that never shrinks
    pub fn full_width_height(height: f32) -> Style {
        Style {
            flex_shrink: 0.0,
            size: Size {
                width: Dimension::Percent(1.0),
                height: Dimension::Length(height),
            },
            ..Default::default()
        }
    }

    /// Absolutely positioned child covering its parent, with vertical padding
    pub fn absolute_fill(vertical_padding: f32) -> Style {
        Style {
            position: Position::Absolute,
            inset: Rect {
                left: LengthPercentageAuto::Length(0.0),
                right: LengthPercentageAuto::Length(0.0),
                top: LengthPercentageAuto::Length(0.0),
                bottom: LengthPercentageAuto::Length(0.0),
            },
            padding: Rect {
                left: LengthPercentage::Length(0.0),
                right: LengthPercentage::Length(0.0),
                top: LengthPercentage::Length(vertical_padding),
                bottom: LengthPercentage::Length(vertical_padding),
            },
            ..Default::default()
        }
    }

    /// Absolutely positioned strip pinned to the parent's top edge
    pub fn absolute_top(height: f32) -> Style {
        Style {
            position: Position::Absolute,
            inset: Rect {
                left: LengthPercentageAuto::Length(0.0),
                right: LengthPercentageAuto::Length(0.0),
                top: LengthPercentageAuto::Length(0.0),
                bottom: LengthPercentageAuto::Auto,
            },
            size: Size {
                width: Dimension::Auto,
                height: Dimension::Length(height),
            },
            ..Default::default()
        }
    }
}
