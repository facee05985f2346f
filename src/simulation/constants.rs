//! Unit system and default numeric knobs
//!
//! Internal units are chosen so Kepler's third law is trivial:
//! - length: astronomical unit (AU)
//! - time:   Julian year (365.25 days)
//! - mass:   solar mass
//!
//! which gives `G = 4π²` in AU³ / (yr² · M_sun)

use std::f64::consts::PI;

/// 1 AU in meters (IAU 2012, exact)
pub const AU_IN_METERS: f64 = 149_597_870_700.0;

pub const DAY_IN_SECONDS: f64 = 86_400.0;
pub const DAYS_PER_YEAR: f64 = 365.25;
pub const SECONDS_PER_YEAR: f64 = DAY_IN_SECONDS * DAYS_PER_YEAR;

/// Nominal solar mass (kg)
pub const M_SUN_IN_KG: f64 = 1.988_47e30;

/// Speed of light (m/s)
pub const C_SI: f64 = 299_792_458.0;

/// Gravitational constant in AU³ / (yr² · M_sun)
pub const G: f64 = 4.0 * PI * PI;

/// Speed of light in AU / yr
pub const C_AU_PER_YR: f64 = C_SI * SECONDS_PER_YEAR / AU_IN_METERS;

/// Default timestep (yr), about 0.37 days
pub const DT: f64 = 0.001;

/// Softening length for the force model (AU)
pub const EPS_ACCEL: f64 = 1e-5;

/// Softening length for sampled potentials (AU)
pub const EPS_POTENTIAL: f64 = 1e-3;

pub const ENABLE_1PN_DEFAULT: bool = true;

/// Steps between periodic diagnostics reports
pub const REPORT_EVERY: u64 = 250;

pub const DEG2RAD: f64 = PI / 180.0;
pub const RAD2DEG: f64 = 180.0 / PI;

pub fn kg_to_solar_mass(kg: f64) -> f64 {
    kg / M_SUN_IN_KG
}
