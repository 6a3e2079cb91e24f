//! dragsheet Core
//!
//! Foundational primitives shared by the sheet widget crates:
//!
//! - **Geometry**: points, vectors, sizes and rectangles in device-independent pixels
//! - **Color**: RGBA colors for fills and the dimming backdrop
//! - **Events**: raw pointer events as delivered by the platform
//! - **Bindings**: a shared value with a setter and change observers
//! - **Viewport**: runtime-queried screen metrics
//!
//! # Example
//!
//! ```rust
//! use dragsheet_core::Binding;
//!
//! let is_shown = Binding::new(false);
//! let widget_view = is_shown.clone();
//!
//! is_shown.set(true);
//! assert!(widget_view.get());
//! ```

pub mod binding;
pub mod color;
pub mod events;
pub mod geometry;
pub mod viewport;

pub use binding::{Binding, SubscriptionId};
pub use color::Color;
pub use events::{EventResponse, PointerEvent, PointerPhase};
pub use geometry::{Point, Rect, Size, Vec2};
pub use viewport::{FixedViewport, SharedViewport, ViewportMetrics, DEFAULT_TOP_INSET};
