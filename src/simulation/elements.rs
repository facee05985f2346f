//! Keplerian orbital elements <-> Cartesian state vectors
//!
//! Classical element set: a, e, i, node (Omega), argument of periapsis
//! (omega) and an anomaly. Both directions take the gravitational
//! parameter `mu = G (M_central + m_body)` explicitly.
//!
//! `elements_to_state` is only defined for bound ellipses (`a > 0`,
//! `0 <= e < 1`). Callers validate that; nothing here checks it.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::simulation::constants::DEG2RAD;
use crate::simulation::kepler::{
    eccentric_from_true, mean_from_eccentric, solve_kepler, wrap_to_2pi, KeplerSolution, KEPLER_MAX_ITER,
    KEPLER_TOL,
};
use crate::simulation::states::NVec3;
use nalgebra::Matrix3;

/// Magnitude guard for degenerate geometry (|h|, |N|, e)
const SMALL: f64 = 1e-8;
/// Zero-energy guard for the parabolic limit
const EPS: f64 = 1e-12;

/// Anomaly carried by an element set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Anomaly {
    Mean(f64),
    True(f64),
}

/// Classical Keplerian elements, angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (AU)
    pub a: f64,
    /// Eccentricity
    pub e: f64,
    /// Inclination
    pub i: f64,
    /// Longitude of ascending node
    pub raan: f64,
    /// Argument of periapsis
    pub arg_periapsis: f64,
    pub anomaly: Anomaly,
}

impl OrbitalElements {
    /// Element set with a mean anomaly, all angles in radians
    pub fn new(a: f64, e: f64, i: f64, raan: f64, arg_periapsis: f64, mean_anomaly: f64) -> Self {
        Self { a, e, i, raan, arg_periapsis, anomaly: Anomaly::Mean(mean_anomaly) }
    }

    /// Same as [`OrbitalElements::new`] with angles in degrees
    pub fn from_degrees(a: f64, e: f64, i_deg: f64, raan_deg: f64, aop_deg: f64, ma_deg: f64) -> Self {
        Self::new(a, e, i_deg * DEG2RAD, raan_deg * DEG2RAD, aop_deg * DEG2RAD, ma_deg * DEG2RAD)
    }

    /// Mean motion (rad/yr)
    pub fn mean_motion(&self, mu: f64) -> f64 {
        (mu / self.a.powi(3)).sqrt()
    }

    /// Keplerian period (yr)
    pub fn period(&self, mu: f64) -> f64 {
        TAU / self.mean_motion(mu)
    }

    /// Mean anomaly, converting from the true anomaly if needed
    pub fn mean_anomaly(&self) -> f64 {
        match self.anomaly {
            Anomaly::Mean(m) => wrap_to_2pi(m),
            Anomaly::True(nu) => mean_from_eccentric(eccentric_from_true(nu, self.e), self.e),
        }
    }
}

/// Cartesian position (AU) and velocity (AU/yr)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: NVec3,
    pub velocity: NVec3,
}

/// Instantaneous Keplerian orbit of a live state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OsculatingElements {
    /// Mean anomaly for ellipses, true anomaly otherwise
    pub elements: OrbitalElements,
    pub true_anomaly: f64,
    /// `None` unless bound
    pub eccentric_anomaly: Option<f64>,
    /// v^2/2 - mu/r (AU^2/yr^2)
    pub specific_energy: f64,
    /// r x v (AU^2/yr)
    pub angular_momentum: NVec3,
    /// Keplerian period (yr), `None` unless bound
    pub period: Option<f64>,
}

/// Perifocal -> reference frame rotation Rz(Omega) Rx(i) Rz(omega)
pub fn perifocal_rotation(i: f64, raan: f64, arg_periapsis: f64) -> Matrix3<f64> {
    let (sin_o, cos_o) = raan.sin_cos();
    let (sin_i, cos_i) = i.sin_cos();
    let (sin_w, cos_w) = arg_periapsis.sin_cos();

    Matrix3::new(
        cos_o * cos_w - sin_o * sin_w * cos_i, -cos_o * sin_w - sin_o * cos_w * cos_i, sin_o * sin_i,
        sin_o * cos_w + cos_o * sin_w * cos_i, -sin_o * sin_w + cos_o * cos_w * cos_i, -cos_o * sin_i,
        sin_w * sin_i, cos_w * sin_i, cos_i,
    )
}

/// Convert an elliptic element set to a Cartesian state relative to the central body
pub fn elements_to_state(el: &OrbitalElements, mu: f64) -> StateVector {
    elements_to_state_with_solution(el, mu).0
}

/// [`elements_to_state`], also returning the Kepler solve when the set
/// carried a mean anomaly
pub fn elements_to_state_with_solution(el: &OrbitalElements, mu: f64) -> (StateVector, Option<KeplerSolution>) {
    let (a, e) = (el.a, el.e);
    let (ecc_anom, solution) = match el.anomaly {
        Anomaly::Mean(m) => {
            let sol = solve_kepler(m, e, KEPLER_TOL, KEPLER_MAX_ITER);
            (sol.eccentric_anomaly, Some(sol))
        }
        Anomaly::True(nu) => (eccentric_from_true(nu, e), None),
    };
    let (sin_e, cos_e) = ecc_anom.sin_cos();
    let eta = (1.0 - e * e).sqrt();

    // Orbital plane, x' toward periapsis
    let r_orb = NVec3::new(a * (cos_e - e), a * eta * sin_e, 0.0);

    let n = (mu / a.powi(3)).sqrt();
    let denom = 1.0 - e * cos_e;
    let v_orb = NVec3::new(-a * n * sin_e / denom, a * n * eta * cos_e / denom, 0.0);

    let rot = perifocal_rotation(el.i, el.raan, el.arg_periapsis);
    let state = StateVector {
        position: rot * r_orb,
        velocity: rot * v_orb,
    };
    (state, solution)
}

/// Osculating elements of a state relative to the central body
///
/// Circular and equatorial orbits fall back to measuring angles from the
/// node line or the reference x axis. Angles come back in [0, 2pi).
pub fn state_to_elements(r: &NVec3, v: &NVec3, mu: f64) -> OsculatingElements {
    let rmag = r.norm();
    let v2 = v.norm_squared();

    let h_vec = r.cross(v);
    let h = h_vec.norm();

    // Node vector z x h
    let n_vec = NVec3::new(-h_vec.y, h_vec.x, 0.0);
    let n = n_vec.norm();

    let specific_energy = 0.5 * v2 - mu / rmag.max(EPS);

    // Laplace-Runge-Lenz direction, |e_vec| = e
    let e_vec = ((v2 - mu / rmag.max(EPS)) * r - r.dot(v) * v) / mu;
    let e = e_vec.norm();

    // Vis-viva, infinite in the parabolic limit
    let a = if specific_energy.abs() < EPS {
        f64::INFINITY
    } else {
        -mu / (2.0 * specific_energy)
    };

    let i = if h > SMALL {
        (h_vec.z / h).clamp(-1.0, 1.0).acos()
    } else {
        0.0
    };

    // Retrograde equatorial orbits see in-plane angles mirrored
    let sense = if h_vec.z < 0.0 { -1.0 } else { 1.0 };

    let raan = if n > SMALL { wrap_to_2pi(n_vec.y.atan2(n_vec.x)) } else { 0.0 };

    let arg_periapsis = if e > SMALL && n > SMALL {
        let cos_w = (n_vec.dot(&e_vec) / (n * e)).clamp(-1.0, 1.0);
        let sin_w = if h > SMALL { n_vec.cross(&e_vec).dot(&h_vec) / (n * e * h) } else { 0.0 };
        wrap_to_2pi(sin_w.atan2(cos_w))
    } else if e > SMALL {
        // Equatorial: measured from +x in the plane
        wrap_to_2pi(sense * e_vec.y.atan2(e_vec.x))
    } else {
        0.0
    };

    let true_anomaly = if e > SMALL && rmag > SMALL {
        let cos_nu = (e_vec.dot(r) / (e * rmag)).clamp(-1.0, 1.0);
        let sin_nu = if h > SMALL { e_vec.cross(r).dot(&h_vec) / (e * rmag * h) } else { 0.0 };
        wrap_to_2pi(sin_nu.atan2(cos_nu))
    } else if n > SMALL && rmag > SMALL {
        // Circular: argument of latitude from the node line
        let n_hat = n_vec / n;
        let cos_u = (n_hat.dot(r) / rmag).clamp(-1.0, 1.0);
        let sin_u = if h > SMALL { n_hat.cross(r).dot(&h_vec) / (rmag * h) } else { 0.0 };
        wrap_to_2pi(sin_u.atan2(cos_u))
    } else {
        // Circular and equatorial: true longitude
        wrap_to_2pi(sense * r.y.atan2(r.x))
    };

    let bound = e < 1.0 - SMALL && a.is_finite() && a > 0.0;
    let (anomaly, eccentric_anomaly, period) = if bound {
        let ecc_anom = eccentric_from_true(true_anomaly, e);
        let period = TAU * (a.powi(3) / mu).sqrt();
        (Anomaly::Mean(mean_from_eccentric(ecc_anom, e)), Some(wrap_to_2pi(ecc_anom)), Some(period))
    } else {
        (Anomaly::True(true_anomaly), None, None)
    };

    OsculatingElements {
        elements: OrbitalElements { a, e, i, raan, arg_periapsis, anomaly },
        true_anomaly,
        eccentric_anomaly,
        specific_energy,
        angular_momentum: h_vec,
        period,
    }
}
