//! Massive bodies: stars and planets that act as gravity sources
//!
//! Bodies live in an arena (`Bodies`) and are addressed by a stable `BodyId`.
//! Their trajectories are fixed in this simulation; the per-step update still
//! runs for every body so orbiting bodies can be added later.

use glam::DVec2;

/// Celestial body types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
}

/// How a body's own state evolves each sub-step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Motion {
    /// Position and velocity never change
    #[default]
    Fixed,
}

/// Stable index of a body inside `Bodies`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(usize);

impl BodyId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub name: String,
    pub kind: BodyKind,
    pub mass: f64,   // kg
    pub radius: f64, // physical radius in m
    pub position: DVec2,
    pub velocity: DVec2,
    pub motion: Motion,
    pub render_size: f32, // pixels
    pub color: [f32; 4],
}

impl CelestialBody {
    pub fn new(name: &str, kind: BodyKind, mass: f64, radius: f64, render_size: f32, color: [f32; 4]) -> Self {
        Self {
            name: name.to_string(),
            kind,
            mass,
            radius,
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            motion: Motion::Fixed,
            render_size,
            color,
        }
    }

    pub fn at(mut self, position: DVec2, velocity: DVec2) -> Self {
        self.position = position;
        self.velocity = velocity;
        self
    }

    /// State after `dt`, computed against a snapshot of all bodies.
    /// `None` means the body does not move.
    pub fn next_state(&self, _bodies: &[CelestialBody], _dt: f64) -> Option<(DVec2, DVec2)> {
        match self.motion {
            Motion::Fixed => None,
        }
    }

    /// Whether a point lies strictly inside the body surface
    pub fn contains(&self, point: DVec2) -> bool {
        (point - self.position).length() < self.radius
    }
}

/// Arena of massive bodies, created once and never shrunk
#[derive(Debug, Clone, Default)]
pub struct Bodies {
    bodies: Vec<CelestialBody>,
}

impl Bodies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, body: CelestialBody) -> BodyId {
        self.bodies.push(body);
        BodyId(self.bodies.len() - 1)
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.0)
    }

    /// Find body by name
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name == name).map(BodyId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &CelestialBody)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    pub fn as_slice(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Advance every body by `dt`. All next states are computed from the
    /// same pre-step snapshot before any body is written.
    pub fn advance(&mut self, dt: f64) {
        let updates: Vec<_> = self
            .bodies
            .iter()
            .map(|body| body.next_state(&self.bodies, dt))
            .collect();

        for (body, update) in self.bodies.iter_mut().zip(updates) {
            if let Some((position, velocity)) = update {
                body.position = position;
                body.velocity = velocity;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bodies {
        let mut bodies = Bodies::new();
        bodies.push(CelestialBody::new("Sun", BodyKind::Star, 2.0e30, 7.0e8, 60.0, [1.0; 4]));
        bodies.push(
            CelestialBody::new("Rock", BodyKind::Planet, 6.0e24, 6.4e6, 30.0, [0.5; 4])
                .at(DVec2::new(1.5e11, 0.0), DVec2::new(0.0, 29_800.0)),
        );
        bodies
    }

    #[test]
    fn ids_are_stable_indices() {
        let bodies = sample();
        let rock = bodies.find("Rock").unwrap();
        assert_eq!(rock.index(), 1);
        assert_eq!(bodies.get(rock).unwrap().kind, BodyKind::Planet);
        assert!(bodies.find("Moon").is_none());
    }

    #[test]
    fn fixed_bodies_do_not_move() {
        let mut bodies = sample();
        for _ in 0..1000 {
            bodies.advance(3600.0);
        }
        let rock = bodies.get(bodies.find("Rock").unwrap()).unwrap();
        assert_eq!(rock.position, DVec2::new(1.5e11, 0.0));
        assert_eq!(rock.velocity, DVec2::new(0.0, 29_800.0));
    }

    #[test]
    fn contains_is_strict() {
        let bodies = sample();
        let sun = bodies.get(BodyId(0)).unwrap();
        assert!(sun.contains(DVec2::new(6.9e8, 0.0)));
        assert!(!sun.contains(DVec2::new(7.0e8, 0.0)));
    }
}
