//! Animation scheduler
//!
//! Owns every live spring and steps them once per frame. Widgets keep a
//! `SpringId` and read values back after the host has ticked the scheduler.

use crate::spring::Spring;
use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex};

new_key_type! {
    pub struct SpringId;
}

/// Scheduler shared between the host (which ticks it) and widgets (which
/// hold weak references to it)
pub type SharedAnimationScheduler = Arc<Mutex<AnimationScheduler>>;

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
        }
    }

    /// Create a scheduler wrapped for sharing
    pub fn shared() -> SharedAnimationScheduler {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        self.springs.insert(spring)
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    /// Run a closure against a spring if it still exists
    pub fn with_spring_mut<R, F>(&mut self, id: SpringId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Spring) -> R,
    {
        self.springs.get_mut(id).map(f)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        self.springs.remove(id)
    }

    /// Advance all springs by a fixed delta (deterministic runs and tests)
    pub fn step(&mut self, dt: f32) {
        for (_, spring) in self.springs.iter_mut() {
            spring.step(dt);
        }
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.springs.iter().any(|(_, s)| !s.is_settled())
    }

    /// Get the number of springs in the scheduler
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spring::SpringConfig;

    #[test]
    fn test_step_advances_all_springs() {
        let mut scheduler = AnimationScheduler::new();
        let mut a = Spring::new(SpringConfig::snappy(), 0.0);
        a.set_target(1.0);
        let mut b = Spring::new(SpringConfig::gentle(), 10.0);
        b.set_target(0.0);

        let a = scheduler.add_spring(a);
        let b = scheduler.add_spring(b);
        assert!(scheduler.has_active_animations());

        for _ in 0..600 {
            scheduler.step(1.0 / 60.0);
        }

        assert!(!scheduler.has_active_animations());
        assert_eq!(scheduler.get_spring(a).map(Spring::value), Some(1.0));
        assert_eq!(scheduler.get_spring(b).map(Spring::value), Some(0.0));
    }

    #[test]
    fn test_with_spring_mut_on_removed_spring() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.add_spring(Spring::new(SpringConfig::snappy(), 0.0));
        assert!(scheduler.remove_spring(id).is_some());
        assert_eq!(scheduler.with_spring_mut(id, |s| s.set_target(1.0)), None);
        assert_eq!(scheduler.spring_count(), 0);
    }
}
