use serde::{Deserialize, Serialize};
use ultraviolet::DVec2;

use crate::error::{Result, SimError};
use crate::trail::{Trail, TrailRetention};

/// RGB display color. Only the renderer reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const WHITE: Color = Color([255, 255, 255]);
    pub const YELLOW: Color = Color([255, 255, 0]);
    pub const GREEN: Color = Color([0, 255, 0]);
    pub const ORANGE: Color = Color([255, 100, 0]);
    pub const GREY: Color = Color([150, 150, 150]);
}

/// Represents a gravitating point mass in the simulation.
#[derive(Clone, Debug)]
pub struct Body {
    /// Position vector (m).
    pub(crate) position: DVec2,
    /// Velocity vector (m/s).
    pub(crate) velocity: DVec2,
    mass: f64,
    primary: bool,
    /// Separation from the primary as of the last force evaluation (m).
    pub(crate) distance_to_primary: f64,
    pub(crate) trail: Trail,
    name: String,
    /// Visual radius, in display units.
    radius: f64,
    color: Color,
}

impl Body {
    /// Creates a non-primary body with an empty, unbounded trail.
    /// Fails if `mass` is not strictly positive or the state is not finite.
    pub fn new(name: impl Into<String>, position: DVec2, velocity: DVec2, mass: f64) -> Result<Self> {
        let name = name.into();
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::NonPositiveMass { name, mass });
        }
        let finite = [position.x, position.y, velocity.x, velocity.y]
            .iter()
            .all(|c| c.is_finite());
        if !finite {
            return Err(SimError::NonFiniteState { name });
        }

        Ok(Self {
            position,
            velocity,
            mass,
            primary: false,
            distance_to_primary: 0.0,
            trail: Trail::default(),
            name,
            radius: 1.0,
            color: Color::WHITE,
        })
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Marks this body as the gravitational center used for distance reporting.
    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    /// Replaces the trail with an empty one using `retention`.
    pub fn with_trail(mut self, retention: TrailRetention) -> Self {
        self.trail = Trail::new(retention);
        self
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn distance_to_primary(&self) -> f64 {
        self.distance_to_primary
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Gravitational force exerted on `self` by `other`, pointing toward `other`.
    ///
    /// Records the separation in `distance_to_primary` when `other` is the primary;
    /// nothing else is mutated. Coincident positions are not guarded against and
    /// yield non-finite components.
    pub fn attraction(&mut self, other: &Body, g: f64) -> DVec2 {
        let (force, distance) = gravity(g, self.mass, self.position, other.mass, other.position);
        if other.primary {
            self.distance_to_primary = distance;
        }
        force
    }
}

/// Newtonian pull on `mass` at `pos` toward `other_mass` at `other_pos`.
/// Returns the force vector and the separation.
pub fn gravity(g: f64, mass: f64, pos: DVec2, other_mass: f64, other_pos: DVec2) -> (DVec2, f64) {
    let d = other_pos - pos;
    let distance = d.mag();
    let force = g * mass * other_mass / (distance * distance);
    let theta = d.y.atan2(d.x);
    (DVec2::new(theta.cos() * force, theta.sin() * force), distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const G: f64 = 6.67428e-11;

    fn pair(mass: f64, half: f64) -> (Body, Body) {
        let a = Body::new("a", DVec2::new(-half, 0.0), DVec2::zero(), mass).unwrap();
        let b = Body::new("b", DVec2::new(half, 0.0), DVec2::zero(), mass).unwrap();
        (a, b)
    }

    #[test]
    fn equal_masses_pull_equal_and_opposite() {
        let (mut a, mut b) = pair(5.0e24, 1.0e9);
        let fa = a.attraction(&b, G);
        let fb = b.attraction(&a, G);

        assert_relative_eq!(fa.mag(), fb.mag(), max_relative = 1e-12);
        assert_relative_eq!(fa.x, -fb.x, max_relative = 1e-12);
        assert!((fa.y + fb.y).abs() <= 1e-12 * fa.mag());
        assert!(fa.x > 0.0, "force on a should point toward b");
    }

    #[test]
    fn inverse_square() {
        let (mut a1, b1) = pair(1.0e20, 1.0e6);
        let (mut a2, b2) = pair(1.0e20, 2.0e6);
        let ratio = a1.attraction(&b1, G).mag() / a2.attraction(&b2, G).mag();
        assert_relative_eq!(ratio, 4.0, max_relative = 1e-12);
    }

    #[test]
    fn magnitude_matches_newton() {
        let (mut a, b) = pair(2.0e10, 5.0);
        let force = a.attraction(&b, G);
        assert_relative_eq!(force.mag(), G * 2.0e10 * 2.0e10 / 100.0, max_relative = 1e-12);
    }

    #[test]
    fn records_distance_only_for_primary() {
        let (mut a, b) = pair(1.0, 3.0);
        a.attraction(&b, G);
        assert_eq!(a.distance_to_primary(), 0.0);

        let b = b.with_primary(true);
        let before = (a.position(), a.velocity());
        a.attraction(&b, G);
        assert_relative_eq!(a.distance_to_primary(), 6.0);
        assert_eq!((a.position(), a.velocity()), before);
    }

    #[test]
    fn rejects_bad_mass() {
        for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Body::new("x", DVec2::zero(), DVec2::zero(), mass).unwrap_err();
            assert!(matches!(err, SimError::NonPositiveMass { .. }));
        }
    }

    #[test]
    fn rejects_non_finite_state() {
        let err = Body::new("x", DVec2::new(f64::NAN, 0.0), DVec2::zero(), 1.0).unwrap_err();
        assert!(matches!(err, SimError::NonFiniteState { .. }));
    }

    #[test]
    fn coincident_positions_are_not_finite() {
        let (mut a, _) = pair(1.0, 1.0);
        let b = a.clone();
        let force = a.attraction(&b, G);
        assert!(!(force.x.is_finite() && force.y.is_finite()));
    }
}
