//! Conservation diagnostics
//!
//! Energy and angular momentum of the whole system, and their drift
//! relative to reference values taken at the start of a run.
//!
//! The potential energy here is the true, unsoftened `-G m_i m_j / r_ij`,
//! while the force model integrates softened dynamics. The mismatch is
//! kept on purpose: drift is measured against physical energy, so a
//! softening length large enough to matter shows up as drift instead of
//! being absorbed into a regularized invariant.

use serde::Serialize;

use crate::simulation::states::{Body, NVec3};

/// Snapshot of the conserved quantities, with optional drift
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiagnosticsReport {
    pub kinetic: f64,
    pub potential: f64,
    pub energy: f64,
    pub angular_momentum: NVec3,
    /// Total momentum, zero in the barycentric frame
    pub linear_momentum: NVec3,
    /// (E - E0) / E0, present when E0 was supplied
    pub energy_drift: Option<f64>,
    /// |H - H0| / |H0|, present when H0 was supplied
    pub angular_momentum_drift: Option<f64>,
}

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// Unsoftened pairwise potential energy; coincident pairs are skipped
pub fn potential_energy(bodies: &[Body], g: f64) -> f64 {
    let mut e_pot = 0.0;
    for (i, bi) in bodies.iter().enumerate() {
        for bj in &bodies[i + 1..] {
            let dist = (bj.x - bi.x).norm();
            if dist > 0.0 {
                e_pot -= g * bi.m * bj.m / dist;
            }
        }
    }
    e_pot
}

pub fn total_energy(bodies: &[Body], g: f64) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies, g)
}

/// Total angular momentum about the origin
pub fn total_angular_momentum(bodies: &[Body]) -> NVec3 {
    let origin = NVec3::zeros();
    bodies
        .iter()
        .fold(NVec3::zeros(), |acc, b| acc + b.angular_momentum_about(&origin))
}

pub fn linear_momentum(bodies: &[Body]) -> NVec3 {
    bodies.iter().fold(NVec3::zeros(), |acc, b| acc + b.momentum())
}

/// Softened gravitational potential at `point`, per unit mass
pub fn gravitational_potential(bodies: &[Body], point: &NVec3, g: f64, eps_potential: f64) -> f64 {
    let eps2 = eps_potential * eps_potential;
    bodies
        .iter()
        .map(|b| -g * b.m / ((point - b.x).norm_squared() + eps2).sqrt())
        .sum()
}

/// Current energy and angular momentum, plus drift against whichever
/// references are given. Zero references produce non-finite drift; that
/// is left to the caller.
pub fn diagnostics_report(bodies: &[Body], g: f64, e0: Option<f64>, h0: Option<NVec3>) -> DiagnosticsReport {
    let kinetic = kinetic_energy(bodies);
    let potential = potential_energy(bodies, g);
    let energy = kinetic + potential;
    let angular_momentum = total_angular_momentum(bodies);

    DiagnosticsReport {
        kinetic,
        potential,
        energy,
        angular_momentum,
        linear_momentum: linear_momentum(bodies),
        energy_drift: e0.map(|e0| (energy - e0) / e0),
        angular_momentum_drift: h0.map(|h0| (angular_momentum - h0).norm() / h0.norm()),
    }
}
