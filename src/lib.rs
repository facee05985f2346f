pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, System, NVec3};
pub use simulation::params::Parameters;
pub use simulation::forces::{Acceleration, AccelSet, Accelerations, NewtonianGravity, compute_accelerations};
pub use simulation::relativity::{PostNewtonian, compute_pn_corrections};
pub use simulation::integrator::{step, prime_accelerations};
pub use simulation::kepler::{solve_kepler, KeplerSolution};
pub use simulation::elements::{elements_to_state, state_to_elements, Anomaly, OrbitalElements, OsculatingElements, StateVector};
pub use simulation::diagnostics::{total_energy, total_angular_momentum, diagnostics_report, DiagnosticsReport};
pub use simulation::scenario::Scenario;
pub use simulation::engine::Engine;

pub use configuration::config::{ScenarioConfig, ConfigError};

pub use benchmark::benchmark::bench_step;
