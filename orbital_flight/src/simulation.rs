//! Simulation world: bodies, ship, time warp and the per-frame update

use crate::bodies::Bodies;
use crate::config::SimConfig;
use crate::integrator::{self, Integrator};
use crate::scenario;
use crate::spacecraft::Spacecraft;
use crate::time_warp::TimeWarp;

/// What one frame of physics did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub sub_steps: usize,
    pub simulated: f64, // seconds
}

pub struct Simulation {
    config: SimConfig,
    pub bodies: Bodies,
    pub ship: Spacecraft,
    pub warp: TimeWarp,
    pub integrator: Integrator,
    pub time: f64, // simulated seconds since start
}

impl Simulation {
    pub fn new(config: SimConfig, bodies: Bodies, ship: Spacecraft) -> Self {
        let warp = TimeWarp::new(&config);
        let integrator = config.integrator;
        Self {
            config,
            bodies,
            ship,
            warp,
            integrator,
            time: 0.0,
        }
    }

    /// Star, planet and player ship with the given configuration
    pub fn with_default_system(config: SimConfig) -> Self {
        let bodies = scenario::star_system();
        let ship = scenario::player_ship(&config);
        Self::new(config, bodies, ship)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run this frame's sub-steps at the current warp factor
    pub fn frame(&mut self) -> FrameReport {
        let plan = self.warp.plan(&self.config);
        log::trace!(
            "warp {:.0}x: {} sub-steps of {:.3}s, remainder {:?}",
            self.warp.factor(),
            plan.count,
            plan.step,
            plan.remainder
        );

        let before = self.time;
        for dt in plan.iter() {
            self.step(dt);
        }

        FrameReport {
            sub_steps: plan.len(),
            simulated: self.time - before,
        }
    }

    /// One sub-step: ship first, then every massive body
    pub fn step(&mut self, dt: f64) {
        integrator::advance(
            &mut self.ship,
            self.bodies.as_slice(),
            dt,
            self.integrator,
            &self.config,
        );
        self.bodies.advance(dt);
        self.time += dt;
    }

    pub fn toggle_integrator(&mut self) {
        self.integrator = self.integrator.toggled();
        log::info!("Integrator: {}", self.integrator.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn frame_follows_warp_plan() {
        let mut sim = Simulation::with_default_system(SimConfig::default());

        let report = sim.frame();
        assert_eq!(report.sub_steps, 100);
        assert_relative_eq!(report.simulated, 10.0, epsilon = 1e-9);
        assert_eq!(sim.ship.trail.len(), 100);

        sim.warp.set(2.5);
        let report = sim.frame();
        assert_eq!(report.sub_steps, 3);
        assert_relative_eq!(report.simulated, 0.25, epsilon = 1e-9);
    }

    #[test]
    fn extreme_warp_frame_advances_further() {
        let mut sim = Simulation::with_default_system(SimConfig::default());
        sim.warp.set(50_000_000.0);

        let report = sim.frame();
        assert_eq!(report.sub_steps, 100);
        assert_relative_eq!(report.simulated, 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn bodies_stay_put_while_ship_moves() {
        let mut sim = Simulation::with_default_system(SimConfig::default());
        let start = sim.ship.position;
        let planet = sim.bodies.find("Planet").unwrap();
        let planet_start = sim.bodies.get(planet).unwrap().position;

        for _ in 0..10 {
            sim.frame();
        }

        assert_ne!(sim.ship.position, start);
        assert_eq!(sim.bodies.get(planet).unwrap().position, planet_start);
    }

    #[test]
    fn integrator_toggle() {
        let mut sim = Simulation::with_default_system(SimConfig::default());
        assert_eq!(sim.integrator, Integrator::RungeKutta4);
        sim.toggle_integrator();
        assert_eq!(sim.integrator, Integrator::SemiImplicitEuler);
    }
}
