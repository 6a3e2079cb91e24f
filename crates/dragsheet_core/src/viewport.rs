//! Viewport metrics
//!
//! Screen/window dimensions are read at runtime on every layout pass because
//! they change with rotation and window resizes.

use crate::geometry::Size;
use std::sync::{Arc, Mutex, PoisonError};

/// Top inset used when the platform does not report a safe area
pub const DEFAULT_TOP_INSET: f32 = 44.0;

/// Read-only access to the current viewport
pub trait ViewportMetrics {
    /// Current viewport size in device-independent pixels
    fn size(&self) -> Size;

    /// Safe-area inset at the top edge, if the platform reports one
    fn safe_area_top(&self) -> Option<f32> {
        None
    }

    /// Top inset to keep clear for fullscreen content
    fn top_inset(&self) -> f32 {
        self.safe_area_top().unwrap_or(DEFAULT_TOP_INSET)
    }
}

/// A viewport with fixed metrics
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedViewport {
    pub size: Size,
    pub safe_area_top: Option<f32>,
}

impl FixedViewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            safe_area_top: None,
        }
    }

    /// Report a platform safe-area top inset
    pub fn with_safe_area_top(mut self, inset: f32) -> Self {
        self.safe_area_top = Some(inset);
        self
    }
}

impl ViewportMetrics for FixedViewport {
    fn size(&self) -> Size {
        self.size
    }

    fn safe_area_top(&self) -> Option<f32> {
        self.safe_area_top
    }
}

/// A resizable viewport shared between the host and its widgets
#[derive(Clone, Debug)]
pub struct SharedViewport {
    inner: Arc<Mutex<FixedViewport>>,
}

impl SharedViewport {
    pub fn new(viewport: FixedViewport) -> Self {
        Self {
            inner: Arc::new(Mutex::new(viewport)),
        }
    }

    fn snapshot(&self) -> FixedViewport {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Update the viewport size (window resize, rotation)
    pub fn resize(&self, width: f32, height: f32) {
        let mut viewport = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(width, height, "viewport resized");
        viewport.size = Size::new(width, height);
    }

    /// Update the reported safe-area top inset
    pub fn set_safe_area_top(&self, inset: Option<f32>) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .safe_area_top = inset;
    }
}

impl ViewportMetrics for SharedViewport {
    fn size(&self) -> Size {
        self.snapshot().size
    }

    fn safe_area_top(&self) -> Option<f32> {
        self.snapshot().safe_area_top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_inset_falls_back() {
        let viewport = FixedViewport::new(390.0, 844.0);
        assert_eq!(viewport.top_inset(), DEFAULT_TOP_INSET);

        let notched = viewport.with_safe_area_top(47.0);
        assert_eq!(notched.top_inset(), 47.0);
    }

    #[test]
    fn test_shared_viewport_resize_is_visible_to_clones() {
        let host = SharedViewport::new(FixedViewport::new(390.0, 844.0));
        let widget = host.clone();

        host.resize(844.0, 390.0);
        assert_eq!(widget.size(), Size::new(844.0, 390.0));

        host.set_safe_area_top(Some(0.0));
        assert_eq!(widget.top_inset(), 0.0);
    }
}
