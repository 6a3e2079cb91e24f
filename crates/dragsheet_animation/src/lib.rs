//! dragsheet Animation System
//!
//! Spring physics and per-frame scheduling for animated widget properties.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Scheduler**: one place that steps every live spring each frame
//! - **Animated values**: retargetable properties that read their current
//!   value from the scheduler and inherit velocity when interrupted

pub mod animated;
pub mod scheduler;
pub mod spring;

pub use animated::AnimatedValue;
pub use scheduler::{AnimationScheduler, SharedAnimationScheduler, SpringId};
pub use spring::{Spring, SpringConfig};
