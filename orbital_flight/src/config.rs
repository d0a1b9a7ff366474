//! Immutable simulation configuration
//!
//! Built once at startup and handed by reference to the integrator, the
//! collision responder and the time-warp scheduler.

use crate::constants::*;
use crate::integrator::Integrator;

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub gravitational_constant: f64,
    pub time_step: f64,
    pub max_steps_per_frame: usize,
    pub max_time_step: f64,
    pub extreme_warp_threshold: f64,
    pub adaptive_step_multiplier: f64,
    pub remainder_epsilon: f64,
    pub min_warp: f64,
    pub max_warp: f64,
    pub initial_warp: f64,
    pub warp_toggle_low: f64,
    pub warp_toggle_high: f64,
    pub trail_capacity: usize,
    pub fuel_burn_rate: f64,
    pub collision_clearance: f64,
    pub integrator: Integrator,
}

impl SimConfig {
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_max_steps_per_frame(mut self, steps: usize) -> Self {
        self.max_steps_per_frame = steps;
        self
    }

    pub fn with_max_time_step(mut self, max_time_step: f64) -> Self {
        self.max_time_step = max_time_step;
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_trail_capacity(mut self, capacity: usize) -> Self {
        self.trail_capacity = capacity;
        self
    }

    /// Size of one adaptive sub-step under extreme warp
    pub fn adaptive_time_step(&self) -> f64 {
        (self.time_step * self.adaptive_step_multiplier).min(self.max_time_step)
    }

    /// Clamp a warp factor into the configured range
    pub fn clamp_warp(&self, factor: f64) -> f64 {
        factor.clamp(self.min_warp, self.max_warp)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            time_step: TIME_STEP,
            max_steps_per_frame: MAX_PHYSICS_STEPS_PER_FRAME,
            max_time_step: MAX_TIME_STEP,
            extreme_warp_threshold: EXTREME_WARP_THRESHOLD,
            adaptive_step_multiplier: ADAPTIVE_STEP_MULTIPLIER,
            remainder_epsilon: REMAINDER_EPSILON,
            min_warp: MIN_WARP,
            max_warp: MAX_WARP,
            initial_warp: INITIAL_WARP,
            warp_toggle_low: WARP_TOGGLE_LOW,
            warp_toggle_high: WARP_TOGGLE_HIGH,
            trail_capacity: TRAIL_CAPACITY,
            fuel_burn_rate: FUEL_BURN_RATE,
            collision_clearance: COLLISION_CLEARANCE,
            integrator: Integrator::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptive_step_is_clamped_to_max() {
        let config = SimConfig::default();
        assert_eq!(config.adaptive_time_step(), 10.0);

        let coarse = SimConfig::default().with_time_step(60.0);
        assert_eq!(coarse.adaptive_time_step(), MAX_TIME_STEP);
    }

    #[test]
    fn warp_is_clamped_to_range() {
        let config = SimConfig::default();
        assert_eq!(config.clamp_warp(0.25), MIN_WARP);
        assert_eq!(config.clamp_warp(1e12), MAX_WARP);
        assert_eq!(config.clamp_warp(4096.0), 4096.0);
    }

    #[test]
    fn defaults_use_rk4() {
        assert_eq!(SimConfig::default().integrator, Integrator::RungeKutta4);
    }
}
