//! Conservation diagnostics.
//!
//! Tracks linear momentum, angular momentum and total energy so that
//! numerical drift of the integrator can be measured against a baseline.

use ultraviolet::DVec2;

use crate::body::Body;
use crate::simulation::Simulation;

/// Total linear momentum: sum_i m_i * v_i
pub fn total_momentum(bodies: &[Body]) -> DVec2 {
    bodies
        .iter()
        .fold(DVec2::zero(), |p, b| p + b.velocity() * b.mass())
}

/// Total angular momentum about the origin (z component of sum_i r_i x m_i v_i).
pub fn total_angular_momentum(bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .map(|b| {
            let (r, v) = (b.position(), b.velocity());
            b.mass() * (r.x * v.y - r.y * v.x)
        })
        .sum()
}

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .map(|b| 0.5 * b.mass() * b.velocity().mag_sq())
        .sum()
}

/// Pairwise gravitational potential energy, each pair counted once.
pub fn potential_energy(bodies: &[Body], g: f64) -> f64 {
    let mut energy = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let r = (b.position() - a.position()).mag();
            energy -= g * a.mass() * b.mass() / r;
        }
    }
    energy
}

pub fn total_energy(bodies: &[Body], g: f64) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies, g)
}

/// Baseline conservation quantities to track drift.
#[derive(Debug, Clone)]
pub struct ConservationState {
    pub baseline_energy: f64,
    pub baseline_momentum: DVec2,
    pub baseline_angular_momentum: f64,
}

impl ConservationState {
    pub fn new(sim: &Simulation) -> Self {
        let g = sim.constants().gravitational_constant;
        Self {
            baseline_energy: total_energy(sim.bodies(), g),
            baseline_momentum: total_momentum(sim.bodies()),
            baseline_angular_momentum: total_angular_momentum(sim.bodies()),
        }
    }
}

/// Drift from the baseline at the current step.
#[derive(Debug, Clone)]
pub struct ConservationMonitor {
    /// Relative energy error: |E - E0| / |E0|
    pub energy_error: f64,
    /// Absolute momentum error: p - p0
    pub momentum_error: DVec2,
    /// Absolute angular momentum error: L - L0
    pub angular_momentum_error: f64,
}

impl ConservationMonitor {
    pub fn check(baseline: &ConservationState, sim: &Simulation) -> Self {
        let g = sim.constants().gravitational_constant;
        let energy = total_energy(sim.bodies(), g);

        let energy_error = if baseline.baseline_energy.abs() > 1e-12 {
            (energy - baseline.baseline_energy).abs() / baseline.baseline_energy.abs()
        } else {
            (energy - baseline.baseline_energy).abs()
        };

        Self {
            energy_error,
            momentum_error: total_momentum(sim.bodies()) - baseline.baseline_momentum,
            angular_momentum_error: total_angular_momentum(sim.bodies())
                - baseline.baseline_angular_momentum,
        }
    }

    pub fn is_violated(&self, energy_tol: f64, momentum_tol: f64, ang_momentum_tol: f64) -> bool {
        self.energy_error > energy_tol
            || self.momentum_error.mag() > momentum_tol
            || self.angular_momentum_error.abs() > ang_momentum_tol
    }
}
