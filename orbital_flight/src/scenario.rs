//! Initial conditions: a star, one planet and the player ship

use glam::DVec2;

use crate::bodies::{Bodies, BodyKind, CelestialBody};
use crate::config::SimConfig;
use crate::spacecraft::Spacecraft;

pub const STAR_MASS: f64 = 1.989e30; // kg
pub const STAR_RADIUS: f64 = 696_340_000.0; // m

pub const PLANET_MASS: f64 = 5.97e29;
pub const PLANET_RADIUS: f64 = 6_371_000.0;
pub const PLANET_DISTANCE: f64 = 1.5e13;
pub const PLANET_SPEED: f64 = 29_800.0;

pub const SHIP_MASS: f64 = 1000.0;
pub const SHIP_DISTANCE: f64 = 1.0e13;
pub const SHIP_SPEED: f64 = 1600.0;
pub const SHIP_FUEL: f64 = 1000.0;
pub const SHIP_ENGINE_POWER: f64 = 50_000.0;

/// The star at the origin and a planet far out on the +x axis
pub fn star_system() -> Bodies {
    let mut bodies = Bodies::new();

    bodies.push(CelestialBody::new(
        "Star",
        BodyKind::Star,
        STAR_MASS,
        STAR_RADIUS,
        60.0,
        [1.0, 0.9, 0.6, 1.0],
    ));

    bodies.push(
        CelestialBody::new(
            "Planet",
            BodyKind::Planet,
            PLANET_MASS,
            PLANET_RADIUS,
            30.0,
            [0.3, 0.5, 0.9, 1.0],
        )
        .at(DVec2::new(PLANET_DISTANCE, 0.0), DVec2::new(0.0, PLANET_SPEED)),
    );

    bodies
}

/// Player ship between star and planet, drifting slowly along +y
pub fn player_ship(config: &SimConfig) -> Spacecraft {
    Spacecraft::new(
        SHIP_MASS,
        DVec2::new(SHIP_DISTANCE, 0.0),
        DVec2::new(0.0, SHIP_SPEED),
        SHIP_FUEL,
        SHIP_ENGINE_POWER,
    )
    .with_trail_capacity(config.trail_capacity)
    .with_render_size(20.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ship_starts_outside_every_body() {
        let bodies = star_system();
        let ship = player_ship(&SimConfig::default());

        assert_eq!(bodies.len(), 2);
        assert!(bodies.iter().all(|(_, body)| !body.contains(ship.position)));
        assert_eq!(ship.trail.capacity(), 1000);
        assert!(!ship.thrust_active);
    }
}
