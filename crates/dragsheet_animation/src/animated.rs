//! Retargetable animated values
//!
//! An `AnimatedValue` is a widget property (an offset, an opacity) whose
//! changes are animated by a spring living in a shared [`AnimationScheduler`].
//! The widget only ever says *where* the value should go; the host ticks the
//! scheduler and the widget samples the current value when building a frame.
//!
//! Initial velocity is relative: a value of `10.0` means "ten times the size
//! of the change, per second", so the kick scales with the distance travelled.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::scheduler::{AnimationScheduler, SpringId};
use crate::spring::{Spring, SpringConfig};

/// Target changes smaller than this are ignored
const RETARGET_EPSILON: f32 = 1e-4;

/// A scalar animated by a scheduler-owned spring
pub struct AnimatedValue {
    scheduler: Weak<Mutex<AnimationScheduler>>,
    spring_id: Option<SpringId>,
    config: SpringConfig,
    initial_velocity: f32,
    value: f32,
    target: f32,
}

fn lock(scheduler: &Arc<Mutex<AnimationScheduler>>) -> MutexGuard<'_, AnimationScheduler> {
    scheduler.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AnimatedValue {
    /// Create a value at rest, animated through `scheduler`
    pub fn new(
        scheduler: &Arc<Mutex<AnimationScheduler>>,
        config: SpringConfig,
        initial_velocity: f32,
        value: f32,
    ) -> Self {
        Self {
            scheduler: Arc::downgrade(scheduler),
            spring_id: None,
            config,
            initial_velocity,
            value,
            target: value,
        }
    }

    /// Create a value with no scheduler; every change snaps
    pub fn detached(config: SpringConfig, value: f32) -> Self {
        Self {
            scheduler: Weak::new(),
            spring_id: None,
            config,
            initial_velocity: 0.0,
            value,
            target: value,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn initial_velocity(&self) -> f32 {
        self.initial_velocity
    }

    /// The value the animation is heading to
    pub fn target(&self) -> f32 {
        self.target
    }

    /// The value as of the last [`sample`](Self::sample)
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_animating(&self) -> bool {
        self.spring_id.is_some()
    }

    /// Animate toward `target`.
    ///
    /// An in-flight spring is retargeted and keeps its velocity; a value at
    /// rest starts a new spring with the configured initial velocity. Returns
    /// `true` if the target changed.
    pub fn animate_to(&mut self, target: f32) -> bool {
        if (target - self.target).abs() < RETARGET_EPSILON {
            return false;
        }
        self.target = target;

        let Some(scheduler) = self.scheduler.upgrade() else {
            self.value = target;
            self.spring_id = None;
            return true;
        };
        let mut scheduler = lock(&scheduler);

        if let Some(id) = self.spring_id {
            if scheduler
                .with_spring_mut(id, |spring| spring.set_target(target))
                .is_some()
            {
                tracing::trace!(target, "retargeted spring");
                return true;
            }
        }

        let mut spring = Spring::new(self.config, self.value);
        spring.set_target(target);
        spring.set_velocity(self.initial_velocity * (target - self.value));
        self.spring_id = Some(scheduler.add_spring(spring));
        tracing::trace!(from = self.value, target, "started spring");
        true
    }

    /// Read the current value from the scheduler.
    ///
    /// Settled springs are released and the value lands exactly on target.
    pub fn sample(&mut self) -> f32 {
        let Some(id) = self.spring_id else {
            return self.value;
        };
        let Some(scheduler) = self.scheduler.upgrade() else {
            self.spring_id = None;
            self.value = self.target;
            return self.value;
        };

        let mut scheduler = lock(&scheduler);
        let settled = match scheduler.get_spring(id) {
            Some(spring) => {
                self.value = spring.value();
                spring.is_settled()
            }
            None => {
                self.value = self.target;
                true
            }
        };

        if settled {
            self.value = self.target;
            scheduler.remove_spring(id);
            self.spring_id = None;
        }
        self.value
    }

    fn release_spring(&mut self) {
        if let Some(id) = self.spring_id.take() {
            if let Some(scheduler) = self.scheduler.upgrade() {
                lock(&scheduler).remove_spring(id);
            }
        }
    }
}

impl Drop for AnimatedValue {
    fn drop(&mut self) {
        self.release_spring();
    }
}

impl std::fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("value", &self.value)
            .field("target", &self.target)
            .field("animating", &self.is_animating())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modal_spring() -> SpringConfig {
        SpringConfig::interpolating(300.0, 30.0)
    }

    fn settle(scheduler: &Arc<Mutex<AnimationScheduler>>, value: &mut AnimatedValue) {
        for _ in 0..240 {
            scheduler.lock().unwrap().step(1.0 / 60.0);
            value.sample();
        }
    }

    #[test]
    fn test_animate_to_reaches_target() {
        let scheduler = AnimationScheduler::shared();
        let mut offset = AnimatedValue::new(&scheduler, modal_spring(), 10.0, 600.0);

        assert!(offset.animate_to(0.0));
        assert!(offset.is_animating());

        scheduler.lock().unwrap().step(1.0 / 60.0);
        let mid = offset.sample();
        assert!(mid < 600.0 && mid > -50.0);

        settle(&scheduler, &mut offset);
        assert_eq!(offset.value(), 0.0);
        assert!(!offset.is_animating());
        assert_eq!(scheduler.lock().unwrap().spring_count(), 0);
    }

    #[test]
    fn test_same_target_is_ignored() {
        let scheduler = AnimationScheduler::shared();
        let mut opacity = AnimatedValue::new(&scheduler, modal_spring(), 10.0, 0.5);
        assert!(!opacity.animate_to(0.5));
        assert!(!opacity.is_animating());
    }

    #[test]
    fn test_retarget_keeps_single_spring() {
        let scheduler = AnimationScheduler::shared();
        let mut offset = AnimatedValue::new(&scheduler, modal_spring(), 10.0, 0.0);

        offset.animate_to(100.0);
        scheduler.lock().unwrap().step(1.0 / 60.0);
        offset.sample();
        offset.animate_to(200.0);

        assert_eq!(scheduler.lock().unwrap().spring_count(), 1);
        settle(&scheduler, &mut offset);
        assert_eq!(offset.value(), 200.0);
    }

    #[test]
    fn test_detached_value_snaps() {
        let mut offset = AnimatedValue::detached(modal_spring(), 600.0);
        offset.animate_to(0.0);
        assert_eq!(offset.sample(), 0.0);
        assert!(!offset.is_animating());
    }

    #[test]
    fn test_dropped_scheduler_snaps_to_target() {
        let scheduler = AnimationScheduler::shared();
        let mut offset = AnimatedValue::new(&scheduler, modal_spring(), 10.0, 0.0);
        offset.animate_to(300.0);
        drop(scheduler);
        assert_eq!(offset.sample(), 300.0);
    }

    #[test]
    fn test_drop_releases_spring() {
        let scheduler = AnimationScheduler::shared();
        {
            let mut offset = AnimatedValue::new(&scheduler, modal_spring(), 10.0, 0.0);
            offset.animate_to(50.0);
            assert_eq!(scheduler.lock().unwrap().spring_count(), 1);
        }
        assert_eq!(scheduler.lock().unwrap().spring_count(), 0);
    }
}
