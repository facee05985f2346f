//! Kepler's equation `M = E - e sin(E)` and anomaly conversions
//! (elliptic orbits only)

use std::f64::consts::{PI, TAU};

pub const KEPLER_TOL: f64 = 1e-10;
pub const KEPLER_MAX_ITER: usize = 50;

/// Result of a Newton-Raphson Kepler solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly (rad), in the same turn as the wrapped mean anomaly
    pub eccentric_anomaly: f64,
    pub iterations: usize,
    /// False when the budget ran out before `|dE| < tol`; the last iterate is kept
    pub converged: bool,
}

/// Solve Kepler's equation for the eccentric anomaly
///
/// `m` is wrapped into [0, 2pi) first. The iteration is seeded at `E = M`
/// for `e < 0.8` and at `E = pi` for more eccentric orbits, where the
/// first guess otherwise tends to overshoot.
pub fn solve_kepler(m: f64, e: f64, tol: f64, max_iter: usize) -> KeplerSolution {
    let m = wrap_to_2pi(m);
    let mut ecc_anom = if e < 0.8 { m } else { PI };

    for k in 0..max_iter {
        let f = ecc_anom - e * ecc_anom.sin() - m;
        let f_prime = 1.0 - e * ecc_anom.cos();
        let step = -f / f_prime;
        ecc_anom += step;
        if step.abs() < tol {
            return KeplerSolution {
                eccentric_anomaly: ecc_anom,
                iterations: k + 1,
                converged: true,
            };
        }
    }

    KeplerSolution {
        eccentric_anomaly: ecc_anom,
        iterations: max_iter,
        converged: false,
    }
}

/// Eccentric anomaly from true anomaly
pub fn eccentric_from_true(nu: f64, e: f64) -> f64 {
    2.0 * ((1.0 - e).sqrt() * (0.5 * nu).sin()).atan2((1.0 + e).sqrt() * (0.5 * nu).cos())
}

/// True anomaly from eccentric anomaly
pub fn true_from_eccentric(ecc_anom: f64, e: f64) -> f64 {
    2.0 * ((1.0 + e).sqrt() * (0.5 * ecc_anom).sin()).atan2((1.0 - e).sqrt() * (0.5 * ecc_anom).cos())
}

/// Mean anomaly from eccentric anomaly, wrapped into [0, 2pi)
pub fn mean_from_eccentric(ecc_anom: f64, e: f64) -> f64 {
    wrap_to_2pi(ecc_anom - e * ecc_anom.sin())
}

/// Wrap an angle into [0, 2pi)
pub fn wrap_to_2pi(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// Signed difference `a - b` folded into [-pi, pi)
pub fn angle_diff(a: f64, b: f64) -> f64 {
    wrap_to_2pi(a - b + PI) - PI
}
