//! dragsheet Layout Engine
//!
//! Flexbox layout powered by Taffy, used to place the backdrop, the sheet
//! panel and its children inside the viewport.

pub mod element;
pub mod error;
pub mod style;
pub mod tree;

pub use element::ElementBounds;
pub use error::{LayoutError, Result};
pub use style::LayoutStyle;
pub use tree::{LayoutNodeId, LayoutTree};
