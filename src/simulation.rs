use crate::{
    body::{gravity, Body},
    error::{Result, SimError},
    render::{Frame, Renderer},
};

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use ultraviolet::DVec2;

/// Physical and display constants shared read-only by every force evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constants {
    /// Newtonian gravitational constant (m^3 kg^-1 s^-2).
    pub gravitational_constant: f64,
    /// Display units per simulation meter, for the renderer's coordinate mapping.
    pub display_scale: f64,
}

impl Constants {
    pub const G: f64 = 6.67428e-11;
    /// One astronomical unit (m).
    pub const AU: f64 = 149.6e6 * 1000.0;
    pub const DISPLAY_SCALE: f64 = 150.0 / Self::AU;

    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("gravitational_constant", self.gravitational_constant),
            ("display_scale", self.display_scale),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidConstant { name, value });
            }
        }
        Ok(())
    }
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            gravitational_constant: Self::G,
            display_scale: Self::DISPLAY_SCALE,
        }
    }
}

/// Which positions a body sees when its forces are summed within one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Bodies are advanced one after another in insertion order, so later bodies
    /// see the already-moved positions of earlier ones. Replays the reference
    /// orbits exactly.
    #[default]
    Sequential,
    /// All forces read the positions from before the step.
    Simultaneous,
}

/// What `step` does when two bodies come too close.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DegeneratePolicy {
    /// No check; coincident bodies produce infinities and NaN.
    Propagate,
    /// Fail the step when a separation is at or below `min_separation`.
    Reject { min_separation: f64 },
}

impl Default for DegeneratePolicy {
    fn default() -> Self {
        Self::Reject { min_separation: 0.0 }
    }
}

#[derive(Clone, Copy, Debug)]
struct Kinematics {
    position: DVec2,
    velocity: DVec2,
    distance_to_primary: f64,
}

impl Kinematics {
    fn of(body: &Body) -> Self {
        Self {
            position: body.position,
            velocity: body.velocity,
            distance_to_primary: body.distance_to_primary,
        }
    }
}

/// Owns the bodies and advances them with fixed-step semi-implicit Euler.
#[derive(Debug)]
pub struct Simulation {
    bodies: Vec<Body>,
    time_step: f64,
    constants: Constants,
    mode: UpdateMode,
    degenerate: DegeneratePolicy,
    steps: u64,
    elapsed: f64,
}

impl Simulation {
    /// One day, in seconds.
    pub const DEFAULT_TIME_STEP: f64 = 3600.0 * 24.0;

    /// Creates a simulation over `bodies`, which are fixed for its lifetime.
    /// At most one body may be primary.
    pub fn new(bodies: Vec<Body>, time_step: f64, constants: Constants) -> Result<Self> {
        if !(time_step.is_finite() && time_step > 0.0) {
            return Err(SimError::InvalidTimeStep(time_step));
        }
        constants.validate()?;

        let mut primaries = bodies.iter().filter(|b| b.is_primary());
        if let (Some(first), Some(second)) = (primaries.next(), primaries.next()) {
            return Err(SimError::MultiplePrimaries {
                first: first.name().to_owned(),
                second: second.name().to_owned(),
            });
        }

        debug!(
            "simulation with {} bodies, dt = {} s, G = {}",
            bodies.len(),
            time_step,
            constants.gravitational_constant
        );

        Ok(Self {
            bodies,
            time_step,
            constants,
            mode: UpdateMode::default(),
            degenerate: DegeneratePolicy::default(),
            steps: 0,
            elapsed: 0.0,
        })
    }

    pub fn with_mode(mut self, mode: UpdateMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    /// Advances every body by one time step.
    ///
    /// For each body in order: sum the pull of every other body, update the
    /// velocity from that force, then the position from the new velocity, and
    /// append the position to the trail. Nothing is committed if a degenerate
    /// separation is rejected.
    pub fn step(&mut self) -> Result<()> {
        let g = self.constants.gravitational_constant;
        let dt = self.time_step;

        let snapshot: Vec<Kinematics> = self.bodies.iter().map(Kinematics::of).collect();
        let mut working = snapshot.clone();

        for (i, body) in self.bodies.iter().enumerate() {
            let mut state = working[i];
            let mut total = DVec2::zero();

            for (j, other) in self.bodies.iter().enumerate() {
                if i == j {
                    continue;
                }
                let other_pos = match self.mode {
                    UpdateMode::Sequential => working[j].position,
                    UpdateMode::Simultaneous => snapshot[j].position,
                };
                let (force, distance) =
                    gravity(g, body.mass(), state.position, other.mass(), other_pos);
                self.check_separation(body, other, distance)?;

                if other.is_primary() {
                    state.distance_to_primary = distance;
                }
                total += force;
            }

            let acc = total / body.mass();
            state.velocity += acc * dt;
            state.position += state.velocity * dt;
            working[i] = state;
        }

        for (body, state) in self.bodies.iter_mut().zip(&working) {
            body.position = state.position;
            body.velocity = state.velocity;
            body.distance_to_primary = state.distance_to_primary;
            body.trail.push(state.position);
        }
        self.steps += 1;
        self.elapsed += dt;

        trace!("step {} done, t = {} s", self.steps, self.elapsed);
        Ok(())
    }

    /// Runs `n` steps, stopping at the first fault.
    pub fn advance(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    fn check_separation(&self, body: &Body, other: &Body, distance: f64) -> Result<()> {
        if let DegeneratePolicy::Reject { min_separation } = self.degenerate {
            // NaN separations fail too.
            if !(distance > min_separation) {
                warn!(
                    "step {}: `{}` and `{}` are {} m apart",
                    self.steps + 1,
                    body.name(),
                    other.name(),
                    distance
                );
                return Err(SimError::DegenerateGeometry {
                    body: body.name().to_owned(),
                    other: other.name().to_owned(),
                    separation: distance,
                });
            }
        }
        Ok(())
    }

    /// Total force currently acting on the body at `index`. Has no side effects.
    pub fn net_force(&self, index: usize) -> Result<DVec2> {
        let body = self.body(index)?;
        let g = self.constants.gravitational_constant;
        Ok(self
            .bodies
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .map(|(_, other)| gravity(g, body.mass(), body.position, other.mass(), other.position).0)
            .fold(DVec2::zero(), |acc, f| acc + f))
    }

    /// True while every position and velocity is finite.
    pub fn is_finite(&self) -> bool {
        self.bodies.iter().all(|b| {
            [b.position.x, b.position.y, b.velocity.x, b.velocity.y]
                .iter()
                .all(|c| c.is_finite())
        })
    }

    pub fn body(&self, index: usize) -> Result<&Body> {
        self.bodies.get(index).ok_or(SimError::BodyIndex(index))
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn find(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name() == name)
    }

    pub fn primary(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.is_primary())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated seconds since construction.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    pub fn degenerate_policy(&self) -> DegeneratePolicy {
        self.degenerate
    }

    /// Immutable view of the current state for a renderer.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            step: self.steps,
            elapsed: self.elapsed,
            display_scale: self.constants.display_scale,
            bodies: self.bodies.iter().map(Into::into).collect(),
        }
    }

    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw(&self.frame());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn lone(velocity: DVec2) -> Simulation {
        let body = Body::new("lone", DVec2::new(1.0, 2.0), velocity, 3.0).unwrap();
        Simulation::new(vec![body], 10.0, Constants::default()).unwrap()
    }

    fn pair(mode: UpdateMode) -> Simulation {
        let a = Body::new("a", DVec2::new(-1.0, 0.0), DVec2::zero(), 1.0e10).unwrap();
        let b = Body::new("b", DVec2::new(1.0, 0.0), DVec2::zero(), 1.0e10).unwrap();
        Simulation::new(vec![a, b], 1.0, Constants::default())
            .unwrap()
            .with_mode(mode)
    }

    #[test]
    fn single_body_feels_no_force() {
        let mut sim = lone(DVec2::new(0.5, -0.25));
        assert_eq!(sim.net_force(0).unwrap(), DVec2::zero());

        sim.step().unwrap();
        let body = sim.body(0).unwrap();
        assert_eq!(body.velocity(), DVec2::new(0.5, -0.25));
        assert_eq!(body.position(), DVec2::new(6.0, -0.5));
        assert_eq!(body.trail().len(), 1);
    }

    #[test]
    fn velocity_updates_before_position() {
        let mut sim = pair(UpdateMode::Simultaneous);
        let force = sim.net_force(0).unwrap();
        sim.step().unwrap();

        // Semi-implicit Euler: p1 = p0 + (v0 + a dt) dt, with v0 = 0 and dt = 1.
        let a = force / 1.0e10;
        let body = sim.body(0).unwrap();
        assert_relative_eq!(body.velocity().x, a.x, max_relative = 1e-12);
        assert_relative_eq!(body.position().x, -1.0 + a.x, max_relative = 1e-12);
    }

    #[test]
    fn modes_differ_only_for_later_bodies() {
        let mut seq = pair(UpdateMode::Sequential);
        let mut sim = pair(UpdateMode::Simultaneous);
        seq.step().unwrap();
        sim.step().unwrap();

        assert_eq!(seq.body(0).unwrap().position(), sim.body(0).unwrap().position());
        // `b` sees `a` already moved closer, so it is pulled harder.
        let seq_b = seq.body(1).unwrap().velocity().x;
        let sim_b = sim.body(1).unwrap().velocity().x;
        assert!(seq_b < sim_b);
    }

    #[test]
    fn rejects_bad_time_step() {
        for dt in [0.0, -1.0, f64::NAN] {
            let err = Simulation::new(vec![], dt, Constants::default()).unwrap_err();
            assert!(matches!(err, SimError::InvalidTimeStep(_)));
        }
    }

    #[test]
    fn rejects_bad_constants() {
        let constants = Constants {
            gravitational_constant: -1.0,
            ..Constants::default()
        };
        let err = Simulation::new(vec![], 1.0, constants).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConstant { name: "gravitational_constant", .. }
        ));
    }

    #[test]
    fn rejects_two_primaries() {
        let a = Body::new("a", DVec2::zero(), DVec2::zero(), 1.0).unwrap().with_primary(true);
        let b = Body::new("b", DVec2::one(), DVec2::zero(), 1.0).unwrap().with_primary(true);
        let err = Simulation::new(vec![a, b], 1.0, Constants::default()).unwrap_err();
        assert!(matches!(err, SimError::MultiplePrimaries { .. }));
    }

    #[test]
    fn out_of_range_index() {
        let sim = lone(DVec2::zero());
        assert!(matches!(sim.body(1), Err(SimError::BodyIndex(1))));
        assert!(sim.net_force(7).is_err());
    }

    #[test]
    fn counts_steps_and_time() {
        let mut sim = lone(DVec2::zero());
        sim.advance(4).unwrap();
        assert_eq!(sim.steps(), 4);
        assert_relative_eq!(sim.elapsed(), 40.0);
    }
}
