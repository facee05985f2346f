//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`ParametersConfig`] – numeric knobs, every field optional
//! - [`CentralConfig`]    – the dominant mass, placed at the origin
//! - [`PlanetConfig`]     – bodies given by orbital elements about the central mass
//! - [`BodyConfig`]       – bodies given by an explicit Cartesian state
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   t_end: 10.0             # years
//!   dt: 0.001               # years
//!   eps_accel: 1.0e-5       # force softening (AU)
//!   eps_potential: 1.0e-3   # potential softening (AU)
//!   relativity: true        # 1PN correction around the central body
//!   report_every: 250       # steps between diagnostics, 0 = off
//!   angles: radians         # or degrees, applies to planet elements
//!
//! central:
//!   name: Sun
//!   mass: 1.0
//!   radius: 0.00465
//!
//! planets:
//!   - name: Earth
//!     a: 1.0
//!     e: 0.0167
//!     i: 0.0
//!     Omega: 0.0
//!     omega: 1.796
//!     M: 0.0
//!     mass: 3.003e-6
//!     radius: 4.26e-5
//!
//! bodies:
//!   - name: Probe
//!     x: [ 2.0, 0.0, 0.0 ]
//!     v: [ 0.0, 4.0, 0.0 ]
//!     m: 0.0
//! ```
//!
//! Unknown keys (display colors and the like) are ignored.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

/// Scenario values the physics core cannot accept
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("body `{name}`: mass must be non-negative and finite, got {mass}")]
    InvalidMass { name: String, mass: f64 },

    #[error("central body `{name}` must have positive mass, got {mass}")]
    MasslessCentral { name: String, mass: f64 },

    #[error("planet `{name}`: semi-major axis must be positive, got {a}")]
    InvalidSemiMajorAxis { name: String, a: f64 },

    #[error("planet `{name}`: only elliptic orbits are supported (0 <= e < 1), got e = {e}")]
    InvalidEccentricity { name: String, e: f64 },

    #[error("body `{name}`: `{field}` needs 3 components, got {len}")]
    BadVector { name: String, field: &'static str, len: usize },

    #[error("`{field}` must be positive and finite, got {value}")]
    InvalidParameter { field: &'static str, value: f64 },
}

/// Unit of the planet element angles
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

/// Numeric knobs; anything left out falls back to `Parameters::default()`
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ParametersConfig {
    pub t_end: Option<f64>,
    pub dt: Option<f64>,
    pub eps_accel: Option<f64>,
    pub eps_potential: Option<f64>,
    pub relativity: Option<bool>,
    pub report_every: Option<u64>,
    #[serde(default)]
    pub angles: AngleUnit,
}

/// The dominant mass
#[derive(Deserialize, Debug, Clone)]
pub struct CentralConfig {
    pub name: String,
    pub mass: f64,
    #[serde(default)]
    pub radius: f64,
}

/// A body placed from orbital elements around the central mass
#[derive(Deserialize, Debug, Clone)]
pub struct PlanetConfig {
    pub name: String,
    pub a: f64,
    pub e: f64,
    pub i: f64,
    #[serde(rename = "Omega")]
    pub raan: f64,
    #[serde(rename = "omega")]
    pub arg_periapsis: f64,
    #[serde(rename = "M")]
    pub mean_anomaly: f64,
    pub mass: f64,
    #[serde(default)]
    pub radius: f64,
}

/// A body with an explicit initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub x: Vec<f64>, // position (AU)
    pub v: Vec<f64>, // velocity (AU/yr)
    pub m: f64,
    #[serde(default)]
    pub radius: f64,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig,
    pub central: CentralConfig,
    #[serde(default)]
    pub planets: Vec<PlanetConfig>,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_str(s).context("malformed scenario YAML")?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("cannot open scenario {}", path.display()))?;
        let reader = BufReader::new(file);
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)
            .with_context(|| format!("cannot parse scenario {}", path.display()))?;
        Ok(cfg)
    }

    /// Check every value against the physics preconditions
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.parameters;
        for (field, value) in [("t_end", p.t_end), ("dt", p.dt), ("eps_potential", p.eps_potential)] {
            if let Some(value) = value {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ConfigError::InvalidParameter { field, value });
                }
            }
        }
        // zero force softening is allowed
        if let Some(value) = p.eps_accel {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidParameter { field: "eps_accel", value });
            }
        }

        let c = &self.central;
        if !(c.mass.is_finite() && c.mass > 0.0) {
            return Err(ConfigError::MasslessCentral { name: c.name.clone(), mass: c.mass });
        }

        for pl in &self.planets {
            check_mass(&pl.name, pl.mass)?;
            if !(pl.a.is_finite() && pl.a > 0.0) {
                return Err(ConfigError::InvalidSemiMajorAxis { name: pl.name.clone(), a: pl.a });
            }
            if !(pl.e.is_finite() && (0.0..1.0).contains(&pl.e)) {
                return Err(ConfigError::InvalidEccentricity { name: pl.name.clone(), e: pl.e });
            }
        }

        for b in &self.bodies {
            check_mass(&b.name, b.m)?;
            for (field, vec) in [("x", &b.x), ("v", &b.v)] {
                if vec.len() != 3 {
                    return Err(ConfigError::BadVector { name: b.name.clone(), field, len: vec.len() });
                }
            }
        }

        Ok(())
    }
}

fn check_mass(name: &str, mass: f64) -> Result<(), ConfigError> {
    if mass.is_finite() && mass >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidMass { name: name.to_string(), mass })
    }
}
