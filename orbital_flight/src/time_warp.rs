//! Time warp: how much simulated time each rendered frame covers
//!
//! `TimeWarp` holds the current warp factor and the input-driven adjustments
//! to it. `plan_frame` turns a warp factor into the list of integration
//! sub-steps for one frame, never more than `max_steps_per_frame` of them.
//!
//! Up to the extreme-warp threshold each sub-step is one base time step,
//! with a final partial step for the fractional part of the warp factor.
//! Beyond the threshold the sub-steps grow to an adaptive size (clamped to
//! `max_time_step`) and their count is `warp / multiplier`. Once the step
//! ceiling is hit, a frame covers less simulated time than the warp factor
//! asks for; this keeps the per-frame cost bounded.

use crate::config::SimConfig;

/// Sub-steps to integrate during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPlan {
    /// Size of each full sub-step
    pub step: f64,
    /// Number of full sub-steps
    pub count: usize,
    /// Trailing partial sub-step, if any
    pub remainder: Option<f64>,
}

impl StepPlan {
    /// Sub-step sizes in execution order
    pub fn iter(&self) -> impl Iterator<Item = f64> {
        std::iter::repeat(self.step)
            .take(self.count)
            .chain(self.remainder)
    }

    pub fn len(&self) -> usize {
        self.count + usize::from(self.remainder.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Simulated seconds this frame will advance
    pub fn total_time(&self) -> f64 {
        self.iter().sum()
    }
}

/// Plan the integration sub-steps for one frame at `warp_factor`
pub fn plan_frame(warp_factor: f64, config: &SimConfig) -> StepPlan {
    let max_steps = config.max_steps_per_frame;

    if warp_factor <= config.extreme_warp_threshold {
        let whole = warp_factor.floor().max(0.0);
        let count = (whole as usize).min(max_steps);
        let fraction = warp_factor - whole;

        StepPlan {
            step: config.time_step,
            count,
            remainder: (fraction > config.remainder_epsilon).then(|| config.time_step * fraction),
        }
    } else {
        let count = ((warp_factor / config.adaptive_step_multiplier).floor() as usize).min(max_steps);

        StepPlan {
            step: config.adaptive_time_step(),
            count,
            remainder: None,
        }
    }
}

/// Current warp factor, adjusted in discrete steps by input commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWarp {
    factor: f64,
    min: f64,
    max: f64,
    toggle_low: f64,
    toggle_high: f64,
}

impl TimeWarp {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            factor: config.clamp_warp(config.initial_warp),
            min: config.min_warp,
            max: config.max_warp,
            toggle_low: config.warp_toggle_low,
            toggle_high: config.warp_toggle_high,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn set(&mut self, factor: f64) {
        self.factor = factor.clamp(self.min, self.max);
        log::info!("Time warp: {:.0}x", self.factor);
    }

    pub fn speed_up(&mut self) {
        self.set(self.factor * 2.0);
    }

    pub fn slow_down(&mut self) {
        self.set(self.factor / 2.0);
    }

    /// Flip between normal and fast-forward
    pub fn toggle(&mut self) {
        let target = if self.factor > self.toggle_low {
            self.toggle_low
        } else {
            self.toggle_high
        };
        self.set(target);
    }

    pub fn plan(&self, config: &SimConfig) -> StepPlan {
        plan_frame(self.factor, config)
    }
}
