//! Base widget trait and types

use std::sync::atomic::{AtomicU64, Ordering};

use dragsheet_core::{EventResponse, PointerEvent};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a mounted widget
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate a fresh id
    pub fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Base trait for all widgets
pub trait Widget {
    /// Get the widget's unique ID
    fn id(&self) -> WidgetId;

    /// Handle a pointer event, reporting whether it was consumed
    fn handle_event(&mut self, event: &PointerEvent) -> EventResponse;

    /// Advance per-frame state by `dt` seconds
    fn update(&mut self, dt: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = WidgetId::next();
        let b = WidgetId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }
}
