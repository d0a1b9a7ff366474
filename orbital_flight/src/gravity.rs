//! Newtonian gravity field of the massive bodies

use glam::DVec2;

use crate::bodies::CelestialBody;

/// Gravity sources plus the constant that scales them
#[derive(Debug, Clone, Copy)]
pub struct GravityField<'a> {
    bodies: &'a [CelestialBody],
    g: f64,
}

impl<'a> GravityField<'a> {
    pub fn new(bodies: &'a [CelestialBody], gravitational_constant: f64) -> Self {
        Self {
            bodies,
            g: gravitational_constant,
        }
    }

    /// Acceleration a single body exerts on a probe.
    ///
    /// Inside the body, including exactly on its surface, the contribution is
    /// zero. This also keeps a probe at the body center away from the
    /// singularity.
    pub fn body_acceleration(&self, body: &CelestialBody, probe: DVec2) -> DVec2 {
        let direction = body.position - probe;
        let distance = direction.length();

        if distance <= body.radius {
            return DVec2::ZERO;
        }

        // a = GM / r², pointing toward the body
        let magnitude = self.g * body.mass / (distance * distance);
        direction.normalize_or_zero() * magnitude
    }

    /// Net acceleration at `probe`, summed over all bodies
    pub fn acceleration_at(&self, probe: DVec2) -> DVec2 {
        self.bodies
            .iter()
            .map(|body| self.body_acceleration(body, probe))
            .fold(DVec2::ZERO, |acc, a| acc + a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::BodyKind;
    use crate::constants::GRAVITATIONAL_CONSTANT;
    use approx::assert_relative_eq;

    fn star() -> CelestialBody {
        CelestialBody::new("Sun", BodyKind::Star, 1.989e30, 6.9634e8, 60.0, [1.0; 4])
    }

    #[test]
    fn points_toward_body() {
        let bodies = [star()];
        let field = GravityField::new(&bodies, GRAVITATIONAL_CONSTANT);

        let probe = DVec2::new(3.0e9, -4.0e9);
        let a = field.acceleration_at(probe);
        let toward = (bodies[0].position - probe).normalize();

        assert_relative_eq!(a.normalize().dot(toward), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn inverse_square_law() {
        let bodies = [star()];
        let field = GravityField::new(&bodies, GRAVITATIONAL_CONSTANT);

        let near = field.acceleration_at(DVec2::new(1.0e10, 0.0)).length();
        let far = field.acceleration_at(DVec2::new(2.0e10, 0.0)).length();

        assert_relative_eq!(near / far, 4.0, epsilon = 1e-9);
        assert_relative_eq!(
            near,
            GRAVITATIONAL_CONSTANT * 1.989e30 / 1.0e20,
            max_relative = 1e-12
        );
    }

    #[test]
    fn magnitude_decreases_with_distance() {
        let bodies = [star()];
        let field = GravityField::new(&bodies, GRAVITATIONAL_CONSTANT);

        let mut last = f64::INFINITY;
        for i in 1..=50 {
            let distance = bodies[0].radius * (1.0 + i as f64 * 0.5);
            let a = field.acceleration_at(DVec2::new(0.0, distance)).length();
            assert!(a < last, "acceleration grew at {distance}");
            last = a;
        }
    }

    #[test]
    fn zero_on_surface_and_inside() {
        let bodies = [star()];
        let field = GravityField::new(&bodies, GRAVITATIONAL_CONSTANT);
        let radius = bodies[0].radius;

        assert_eq!(field.acceleration_at(DVec2::new(radius, 0.0)), DVec2::ZERO);
        assert_eq!(field.acceleration_at(DVec2::new(0.0, radius * 0.5)), DVec2::ZERO);
        assert_eq!(field.acceleration_at(DVec2::ZERO), DVec2::ZERO);
    }

    #[test]
    fn contributions_sum_linearly() {
        let left = star().at(DVec2::new(-1.0e10, 0.0), DVec2::ZERO);
        let right = star().at(DVec2::new(1.0e10, 0.0), DVec2::ZERO);
        let bodies = [left, right];
        let field = GravityField::new(&bodies, GRAVITATIONAL_CONSTANT);

        // Symmetric pull cancels at the midpoint
        let a = field.acceleration_at(DVec2::ZERO);
        assert!(a.length() < 1e-15);

        let probe = DVec2::new(0.0, 5.0e9);
        let sum = field.body_acceleration(&bodies[0], probe) + field.body_acceleration(&bodies[1], probe);
        assert_eq!(field.acceleration_at(probe), sum);
    }
}
