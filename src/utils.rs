use crate::body::Color;
use crate::config::{BodyConfig, SimulationConfig};
use crate::simulation::Constants;

/// The inner solar system: the Sun at rest at the origin and four planets on
/// the x-axis moving tangentially, advanced one day per step.
pub fn solar_system() -> SimulationConfig {
    let body = |name: &str, x: f64, vy: f64, mass: f64, radius: f64, color: Color| BodyConfig {
        name: name.to_owned(),
        position: [x, 0.0],
        velocity: [0.0, vy],
        mass,
        radius,
        color,
        primary: false,
    };

    let mut sun = body("Sun", 0.0, 0.0, 1.98892e30, 30.0, Color::YELLOW);
    sun.primary = true;

    SimulationConfig {
        bodies: vec![
            sun,
            body("Earth", -1.0, 29.783 * 1000.0, 5.9742e24, 16.0, Color::GREEN),
            body("Mars", -1.524, 27.077 * 1000.0, 6.39e23, 12.0, Color::ORANGE),
            body("Mercury", 0.387, -47.4 * 1000.0, 3.30e23, 9.0, Color::GREY),
            body("Venus", 0.723, -35.02 * 1000.0, 4.8685e24, 14.0, Color::ORANGE),
        ],
        ..SimulationConfig::default()
    }
}

/// Generates a sun-like primary and `n` light bodies on circular orbits between
/// 0.3 and 3 AU, at random angles and in random directions.
/// The same `seed` always produces the same system.
pub fn circular_orbits(n: usize, seed: u64) -> SimulationConfig {
    let mut rng = fastrand::Rng::with_seed(seed);
    let primary_mass = 1.98892e30;
    let gm = Constants::G * primary_mass;

    let mut bodies = Vec::with_capacity(n + 1);
    bodies.push(BodyConfig {
        name: "primary".to_owned(),
        position: [0.0, 0.0],
        velocity: [0.0, 0.0],
        mass: primary_mass,
        radius: 30.0,
        color: Color::YELLOW,
        primary: true,
    });

    for i in 0..n {
        let a = rng.f64() * std::f64::consts::TAU;
        let (sin, cos) = a.sin_cos();
        // Radius in AU
        let r = 0.3 + rng.f64() * 2.7;

        // Velocity for circular orbit: v = sqrt(GM / r), perpendicular to the radius
        let v = (gm / (r * Constants::AU)).sqrt();
        let dir = if rng.bool() { 1.0 } else { -1.0 };

        bodies.push(BodyConfig {
            name: format!("body-{i}"),
            position: [cos * r, sin * r],
            velocity: [-sin * v * dir, cos * v * dir],
            mass: 1.0e22 + rng.f64() * 1.0e24,
            radius: 5.0,
            color: Color::GREY,
            primary: false,
        });
    }

    SimulationConfig {
        bodies,
        ..SimulationConfig::default()
    }
}
