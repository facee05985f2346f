//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the runtime knobs:
//! - step size and end time,
//! - force and potential softening lengths,
//! - gravitational constant and speed of light (internal units),
//! - relativity toggle and diagnostics cadence

use super::constants::{C_AU_PER_YR, DT, ENABLE_1PN_DEFAULT, EPS_ACCEL, EPS_POTENTIAL, G, REPORT_EVERY};

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end (yr)
    pub dt: f64, // step size (yr)
    pub eps_accel: f64, // force softening length (AU)
    pub eps_potential: f64, // potential softening length (AU)
    pub g: f64, // gravitational constant
    pub c: f64, // speed of light (AU/yr)
    pub relativity: bool, // add the 1PN correction
    pub central: usize, // index of the dominant mass for the 1PN correction
    pub report_every: u64, // steps between diagnostics reports, 0 disables
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            t_end: 1.0,
            dt: DT,
            eps_accel: EPS_ACCEL,
            eps_potential: EPS_POTENTIAL,
            g: G,
            c: C_AU_PER_YR,
            relativity: ENABLE_1PN_DEFAULT,
            central: 0,
            report_every: REPORT_EVERY,
        }
    }
}

impl Parameters {
    /// Squared force softening, as used inside the distance terms
    pub fn eps2(&self) -> f64 {
        self.eps_accel * self.eps_accel
    }
}
