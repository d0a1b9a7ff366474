//! Player spacecraft: the one body the integrator moves
//!
//! Carries fuel, a fixed engine power, a thrust flag and direction, and a
//! bounded trail of past positions.

use glam::DVec2;

use crate::bodies::BodyId;
use crate::trail::Trail;

/// Spacecraft state
#[derive(Debug, Clone)]
pub struct Spacecraft {
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64, // kg

    // Propulsion
    pub fuel: f64,
    pub engine_power: f64,
    pub thrust_active: bool,
    pub thrust_direction: DVec2,

    pub trail: Trail,

    /// Body the ship last bounced off
    pub last_contact: Option<BodyId>,

    // Display properties
    pub render_size: f32,
    pub color: [f32; 4],
}

impl Spacecraft {
    pub fn new(mass: f64, position: DVec2, velocity: DVec2, fuel: f64, engine_power: f64) -> Self {
        Self {
            position,
            velocity,
            mass,
            fuel: fuel.max(0.0),
            engine_power,
            thrust_active: false,
            thrust_direction: DVec2::new(0.0, -1.0), // "up" on screen
            trail: Trail::new(crate::constants::TRAIL_CAPACITY),
            last_contact: None,
            render_size: 20.0,
            color: [0.2, 0.8, 0.2, 1.0],
        }
    }

    pub fn with_trail_capacity(mut self, capacity: usize) -> Self {
        self.trail = Trail::new(capacity);
        self
    }

    pub fn with_render_size(mut self, render_size: f32) -> Self {
        self.render_size = render_size;
        self
    }

    /// Request thrust on or off. An empty tank refuses the request.
    pub fn apply_thrust(&mut self, active: bool) {
        self.thrust_active = active && self.fuel > 0.0;
    }

    pub fn set_thrust_direction(&mut self, direction: DVec2) {
        self.thrust_direction = direction.normalize_or_zero();
    }

    /// Thrust is only delivered while requested and fuel remains
    pub fn is_thrusting(&self) -> bool {
        self.thrust_active && self.fuel > 0.0
    }

    /// Acceleration the engine delivers right now
    pub fn thrust_acceleration(&self) -> DVec2 {
        if !self.is_thrusting() || self.mass <= 0.0 {
            return DVec2::ZERO;
        }
        self.thrust_direction * (self.engine_power / self.mass)
    }

    /// Remove fuel, never going below zero
    pub fn burn_fuel(&mut self, amount: f64) {
        let had_fuel = self.fuel > 0.0;
        self.fuel = (self.fuel - amount.max(0.0)).max(0.0);
        if had_fuel && self.fuel == 0.0 {
            log::info!("Fuel exhausted, engine offline");
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Get info string for HUD
    pub fn info_string(&self) -> String {
        format!(
            "Speed: {:.0} m/s | Fuel: {:.1}{}",
            self.speed(),
            self.fuel,
            if self.is_thrusting() { " | THRUST" } else { "" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship() -> Spacecraft {
        Spacecraft::new(1000.0, DVec2::ZERO, DVec2::ZERO, 1000.0, 50_000.0)
    }

    #[test]
    fn thrust_needs_fuel() {
        let mut ship = ship();
        ship.apply_thrust(true);
        assert!(ship.is_thrusting());

        ship.burn_fuel(2000.0);
        assert_eq!(ship.fuel, 0.0);
        assert!(!ship.is_thrusting());
        assert_eq!(ship.thrust_acceleration(), DVec2::ZERO);

        ship.apply_thrust(true);
        assert!(!ship.thrust_active);
    }

    #[test]
    fn thrust_acceleration_follows_direction() {
        let mut ship = ship();
        ship.set_thrust_direction(DVec2::new(3.0, 0.0));
        ship.apply_thrust(true);
        assert_eq!(ship.thrust_acceleration(), DVec2::new(50.0, 0.0));
    }

    #[test]
    fn zero_direction_normalizes_to_zero() {
        let mut ship = ship();
        ship.set_thrust_direction(DVec2::ZERO);
        ship.apply_thrust(true);
        assert_eq!(ship.thrust_acceleration(), DVec2::ZERO);
    }

    #[test]
    fn negative_burn_does_not_refuel() {
        let mut ship = ship();
        ship.burn_fuel(-50.0);
        assert_eq!(ship.fuel, 1000.0);
    }
}
