//! Spring physics
//!
//! A damped harmonic oscillator integrated with fourth-order Runge-Kutta:
//!
//! ```text
//! a = (-stiffness * (x - target) - damping * v) / mass
//! ```
//!
//! Large frame deltas are split into fixed sub-steps so that a dropped frame
//! never destabilises a stiff spring.

use serde::Serialize;

/// Largest integration step in seconds
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// Displacement below which a slow spring is considered at rest
const REST_DISPLACEMENT: f32 = 0.001;

/// Speed below which a close spring is considered at rest
const REST_VELOCITY: f32 = 0.001;

/// Spring physical parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Unit-mass spring described by stiffness and damping only
    pub const fn interpolating(stiffness: f32, damping: f32) -> Self {
        Self::new(stiffness, damping, 1.0)
    }

    /// Quick, lightly damped spring for press feedback
    pub const fn snappy() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Fast and critically damped
    pub const fn stiff() -> Self {
        Self::new(600.0, 50.0, 1.0)
    }

    /// Soft, slow settle
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Damping ratio (1.0 = critically damped)
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::snappy()
    }
}

/// A single animated scalar driven by a spring
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest on `value`
    pub fn new(config: SpringConfig, value: f32) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Move the rest position; current value and velocity are kept
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Jump to a value and stop
    pub fn snap(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DISPLACEMENT && self.velocity.abs() < REST_VELOCITY
    }

    fn acceleration(&self, value: f32, velocity: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (value - self.target) - damping * velocity) / mass.max(f32::EPSILON)
    }

    fn integrate(&mut self, dt: f32) {
        let x = self.value;
        let v = self.velocity;

        let a1 = self.acceleration(x, v);
        let (x2, v2) = (x + v * dt * 0.5, v + a1 * dt * 0.5);
        let a2 = self.acceleration(x2, v2);
        let (x3, v3) = (x + v2 * dt * 0.5, v + a2 * dt * 0.5);
        let a3 = self.acceleration(x3, v3);
        let (x4, v4) = (x + v3 * dt, v + a3 * dt);
        let a4 = self.acceleration(x4, v4);

        self.value = x + dt / 6.0 * (v + 2.0 * v2 + 2.0 * v3 + v4);
        self.velocity = v + dt / 6.0 * (a1 + 2.0 * a2 + 2.0 * a3 + a4);
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            self.integrate(h);
            remaining -= h;
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }
}
