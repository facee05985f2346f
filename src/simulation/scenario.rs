//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a validated `ScenarioConfig` and produces a runtime bundle
//! containing:
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0, barycentric frame)
//! - the force set (`AccelSet`: Newtonian gravity + 1PN correction)
//!
//! Planets given by orbital elements are placed relative to the central
//! body with `mu = G (M_central + m_planet)`.

use tracing::{debug, warn};

use crate::configuration::config::{AngleUnit, ConfigError, ScenarioConfig};
use crate::simulation::constants::{DEG2RAD, G};
use crate::simulation::elements::{elements_to_state_with_solution, OrbitalElements};
use crate::simulation::forces::AccelSet;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, System};

pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
}

impl Scenario {
    /// Bundle an existing system with forces built from `parameters`
    pub fn new(system: System, parameters: Parameters) -> Self {
        let forces = AccelSet::from_parameters(&parameters);
        Self { parameters, system, forces }
    }

    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        // Parameters: defaults overridden by whatever the file sets
        let p_cfg = &cfg.parameters;
        let defaults = Parameters::default();
        let parameters = Parameters {
            t_end: p_cfg.t_end.unwrap_or(defaults.t_end),
            dt: p_cfg.dt.unwrap_or(defaults.dt),
            eps_accel: p_cfg.eps_accel.unwrap_or(defaults.eps_accel),
            eps_potential: p_cfg.eps_potential.unwrap_or(defaults.eps_potential),
            relativity: p_cfg.relativity.unwrap_or(defaults.relativity),
            report_every: p_cfg.report_every.unwrap_or(defaults.report_every),
            central: 0,
            ..defaults
        };

        let angle = match p_cfg.angles {
            AngleUnit::Radians => 1.0,
            AngleUnit::Degrees => DEG2RAD,
        };

        // Central body at rest at the origin, index 0
        let c = &cfg.central;
        let mut bodies = vec![Body::new(c.name.clone(), c.mass, c.radius, NVec3::zeros(), NVec3::zeros())];

        // Planets: elements -> state relative to the central body
        for pl in &cfg.planets {
            let elements = OrbitalElements::new(
                pl.a,
                pl.e,
                pl.i * angle,
                pl.raan * angle,
                pl.arg_periapsis * angle,
                pl.mean_anomaly * angle,
            );
            let mu = parameters.g * (c.mass + pl.mass);
            let (sv, solve) = elements_to_state_with_solution(&elements, mu);
            if let Some(sol) = solve.filter(|sol| !sol.converged) {
                warn!(planet = %pl.name, iterations = sol.iterations, "Kepler solve did not converge, using last iterate");
            }
            debug!(planet = %pl.name, r = sv.position.norm(), v = sv.velocity.norm(), "placed from elements");
            bodies.push(Body::new(pl.name.clone(), pl.mass, pl.radius, sv.position, sv.velocity));
        }

        // Explicit states, taken as given
        for bc in &cfg.bodies {
            bodies.push(Body::new(
                bc.name.clone(),
                bc.m,
                bc.radius,
                NVec3::new(bc.x[0], bc.x[1], bc.x[2]),
                NVec3::new(bc.v[0], bc.v[1], bc.v[2]),
            ));
        }

        let mut system = System::new(bodies);
        system.move_to_barycenter();

        Ok(Self::new(system, parameters))
    }

    /// Sun plus Earth on a circular 1 AU orbit, Sun at rest at the origin
    pub fn sun_earth() -> Self {
        // v = sqrt(GM/r) with M = 1, r = 1
        let earth_speed = G.sqrt();
        let system = System::new(vec![
            Body::new("Sun", 1.0, 0.00465, NVec3::zeros(), NVec3::zeros()),
            Body::new("Earth", 3.003e-6, 4.26e-5, NVec3::new(1.0, 0.0, 0.0), NVec3::new(0.0, earth_speed, 0.0)),
        ]);
        Self::new(system, Parameters::default())
    }

    /// Replace the parameters and rebuild the force set to match
    pub fn with_parameters(self, parameters: Parameters) -> Self {
        Self::new(self.system, parameters)
    }
}
