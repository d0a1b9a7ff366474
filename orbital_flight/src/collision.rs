//! Reflective bounce when the ship ends a sub-step inside a body

use glam::DVec2;

use crate::bodies::{BodyId, CelestialBody};
use crate::spacecraft::Spacecraft;

/// Push the ship out of any body it penetrates and reflect its velocity
/// about the surface normal.
///
/// Bodies are checked in order and each hit overwrites the previous
/// correction, so the last penetrated body wins. Returns that body.
pub fn resolve(ship: &mut Spacecraft, bodies: &[CelestialBody], clearance: f64) -> Option<BodyId> {
    let mut contact = None;

    for (index, body) in bodies.iter().enumerate() {
        let offset = ship.position - body.position;
        let distance = offset.length();
        if distance >= body.radius {
            continue;
        }

        let normal = surface_normal(offset, ship.velocity);

        // v' = v - 2(v·n)n
        ship.velocity -= normal * (2.0 * ship.velocity.dot(normal));
        ship.position = body.position + normal * body.radius * clearance;

        log::debug!(
            "Bounced off {} at {:.0} m/s",
            body.name,
            ship.velocity.length()
        );
        contact = Some(index);
    }

    let contact = contact.map(BodyId::from_index);
    if contact.is_some() {
        ship.last_contact = contact;
    }
    contact
}

/// Outward normal at the point of penetration. A ship exactly at the center
/// is pushed back the way it came, or along +x when at rest.
fn surface_normal(offset: DVec2, velocity: DVec2) -> DVec2 {
    offset
        .try_normalize()
        .or_else(|| (-velocity).try_normalize())
        .unwrap_or(DVec2::X)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::BodyKind;
    use approx::assert_relative_eq;

    fn planet(position: DVec2) -> CelestialBody {
        CelestialBody::new("Planet", BodyKind::Planet, 5.97e24, 6.371e6, 30.0, [0.2, 0.4, 0.8, 1.0])
            .at(position, DVec2::ZERO)
    }

    fn ship_at(position: DVec2, velocity: DVec2) -> Spacecraft {
        Spacecraft::new(1000.0, position, velocity, 1000.0, 50_000.0)
    }

    #[test]
    fn head_on_impact_reverses_velocity() {
        let bodies = [planet(DVec2::ZERO)];
        let mut ship = ship_at(DVec2::new(6.0e6, 0.0), DVec2::new(-2500.0, 0.0));

        let contact = resolve(&mut ship, &bodies, 1.1);

        assert_eq!(contact.map(BodyId::index), Some(0));
        assert_eq!(ship.last_contact, contact);
        assert_relative_eq!(ship.velocity.x, 2500.0, epsilon = 1e-9);
        assert_relative_eq!(ship.velocity.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(ship.position.length(), 6.371e6 * 1.1, max_relative = 1e-12);
        assert!(!bodies[0].contains(ship.position));
    }

    #[test]
    fn oblique_impact_keeps_tangential_velocity() {
        let bodies = [planet(DVec2::ZERO)];
        let mut ship = ship_at(DVec2::new(0.0, 6.0e6), DVec2::new(300.0, -400.0));

        resolve(&mut ship, &bodies, 1.1);

        assert_relative_eq!(ship.velocity.x, 300.0, epsilon = 1e-9);
        assert_relative_eq!(ship.velocity.y, 400.0, epsilon = 1e-9);
    }

    #[test]
    fn outside_every_body_is_untouched() {
        let bodies = [planet(DVec2::ZERO)];
        let mut ship = ship_at(DVec2::new(7.0e6, 0.0), DVec2::new(-10.0, 5.0));

        assert!(resolve(&mut ship, &bodies, 1.1).is_none());
        assert_eq!(ship.position, DVec2::new(7.0e6, 0.0));
        assert_eq!(ship.velocity, DVec2::new(-10.0, 5.0));
        assert!(ship.last_contact.is_none());
    }

    #[test]
    fn overlapping_bodies_resolve_in_order() {
        let bodies = [planet(DVec2::ZERO), planet(DVec2::new(1.0e6, 0.0))];
        let mut ship = ship_at(DVec2::new(5.0e5, 1.0e5), DVec2::new(0.0, -100.0));

        let contact = resolve(&mut ship, &bodies, 1.1);

        assert_eq!(contact.map(BodyId::index), Some(1));
    }

    #[test]
    fn ship_at_center_is_pushed_back_along_its_path() {
        let bodies = [planet(DVec2::ZERO)];
        let mut ship = ship_at(DVec2::ZERO, DVec2::new(0.0, -50.0));

        resolve(&mut ship, &bodies, 1.1);

        assert_relative_eq!(ship.position.y, 6.371e6 * 1.1, max_relative = 1e-12);
        assert_relative_eq!(ship.velocity.y, 50.0, epsilon = 1e-9);
    }
}
