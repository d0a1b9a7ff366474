//! Orbital Flight - 2D spacecraft simulation under real gravity
//!
//! The library is the physics core of the interactive binary:
//! - Gravity field of fixed massive bodies (star, planet)
//! - Spacecraft integration with semi-implicit Euler or RK4
//! - Reflective bounce when the ship penetrates a body
//! - Time-warp scheduling of integration sub-steps per rendered frame
//!
//! All quantities are SI: meters, seconds, kilograms.

pub mod bodies;
pub mod collision;
pub mod config;
pub mod gravity;
pub mod integrator;
pub mod scenario;
pub mod simulation;
pub mod spacecraft;
pub mod time_warp;
pub mod trail;

pub use bodies::{BodyId, BodyKind, Bodies, CelestialBody, Motion};
pub use config::SimConfig;
pub use gravity::GravityField;
pub use integrator::Integrator;
pub use simulation::{FrameReport, Simulation};
pub use spacecraft::Spacecraft;
pub use time_warp::{StepPlan, TimeWarp};
pub use trail::Trail;

/// Default physical and scheduling constants
pub mod constants {
    /// Gravitational constant in m³/(kg·s²)
    pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

    /// Base integration step in simulated seconds
    pub const TIME_STEP: f64 = 0.1;

    /// Ceiling on integration sub-steps per rendered frame
    pub const MAX_PHYSICS_STEPS_PER_FRAME: usize = 100;

    /// Largest adaptive step in seconds (one hour)
    pub const MAX_TIME_STEP: f64 = 3600.0;

    /// Warp factors above this use enlarged adaptive steps
    pub const EXTREME_WARP_THRESHOLD: f64 = 10_000_000.0;

    /// Adaptive step size as a multiple of the base step
    pub const ADAPTIVE_STEP_MULTIPLIER: f64 = 100.0;

    /// Fractional warp below this is not worth a partial step
    pub const REMAINDER_EPSILON: f64 = 0.001;

    pub const MIN_WARP: f64 = 1.0;
    pub const MAX_WARP: f64 = 100_000_000.0;
    pub const INITIAL_WARP: f64 = 1000.0;

    /// Warp toggle flips between these two values
    pub const WARP_TOGGLE_LOW: f64 = 1000.0;
    pub const WARP_TOGGLE_HIGH: f64 = 5000.0;

    /// Number of past positions kept for the ship trail
    pub const TRAIL_CAPACITY: usize = 1000;

    /// Fuel burned per unit of engine power
    pub const FUEL_BURN_RATE: f64 = 0.01;

    /// Bounce places the ship at this multiple of the body radius
    pub const COLLISION_CLEARANCE: f64 = 1.1;
}
