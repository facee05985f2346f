//! Run loop over a `Scenario`
//!
//! The engine is the owner of the body collection: it primes the stored
//! accelerations, records the reference energy and angular momentum, steps
//! the system with the scenario's `dt`, and logs a diagnostics report every
//! `report_every` steps

use tracing::{info, warn};

use crate::simulation::diagnostics::{
    diagnostics_report, gravitational_potential, total_angular_momentum, total_energy, DiagnosticsReport,
};
use crate::simulation::elements::{state_to_elements, OsculatingElements};
use crate::simulation::integrator::{prime_accelerations, step};
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec3;

/// Relative energy drift above which a report is logged as a warning
pub const DRIFT_WARN: f64 = 1e-3;

pub struct Engine {
    scenario: Scenario,
    steps: u64, // steps taken since construction
    e0: f64, // reference energy
    h0: NVec3, // reference angular momentum
}

impl Engine {
    pub fn new(mut scenario: Scenario) -> Self {
        let p = &scenario.parameters;
        prime_accelerations(&mut scenario.system, &scenario.forces, p.relativity);

        let bodies = &scenario.system.bodies;
        let e0 = total_energy(bodies, p.g);
        let h0 = total_angular_momentum(bodies);

        info!(
            bodies = bodies.len(),
            dt = p.dt,
            relativity = p.relativity,
            e0,
            h0 = h0.norm(),
            "engine ready"
        );

        Self { scenario, steps: 0, e0, h0 }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn time(&self) -> f64 {
        self.scenario.system.t
    }

    /// Toggle the 1PN correction; stored accelerations are refreshed so the
    /// next step starts from the new force law
    pub fn set_relativity(&mut self, on: bool) {
        let sc = &mut self.scenario;
        sc.parameters.relativity = on;
        prime_accelerations(&mut sc.system, &sc.forces, on);
    }

    /// Advance one step of `parameters.dt`
    pub fn tick(&mut self) {
        let sc = &mut self.scenario;
        step(&mut sc.system, &sc.forces, sc.parameters.dt, sc.parameters.relativity);
        self.steps += 1;

        let every = sc.parameters.report_every;
        if every > 0 && self.steps % every == 0 {
            self.log_report();
        }
    }

    /// Step until `parameters.t_end`, returning the final report
    pub fn run(&mut self) -> DiagnosticsReport {
        let p = &self.scenario.parameters;
        let remaining = ((p.t_end - self.time()) / p.dt).round();
        let n = if remaining > 0.0 { remaining as u64 } else { 0 };

        info!(steps = n, t_end = p.t_end, "run started");
        for _ in 0..n {
            self.tick();
        }

        let report = self.report();
        info!(
            t = self.time(),
            steps = self.steps,
            energy = report.energy,
            d_energy = ?report.energy_drift,
            d_ang_mom = ?report.angular_momentum_drift,
            "run finished"
        );
        report
    }

    /// Diagnostics against the references taken at construction
    pub fn report(&self) -> DiagnosticsReport {
        let sc = &self.scenario;
        diagnostics_report(&sc.system.bodies, sc.parameters.g, Some(self.e0), Some(self.h0))
    }

    /// Softened potential per unit mass at `point`, using `eps_potential`
    pub fn potential_at(&self, point: &NVec3) -> f64 {
        let sc = &self.scenario;
        gravitational_potential(&sc.system.bodies, point, sc.parameters.g, sc.parameters.eps_potential)
    }

    /// Osculating elements of every body except the central one, relative to it
    pub fn osculating(&self) -> Vec<(String, OsculatingElements)> {
        let sc = &self.scenario;
        let central = sc.parameters.central;
        let Some(center) = sc.system.bodies.get(central) else {
            return Vec::new();
        };

        sc.system
            .bodies
            .iter()
            .enumerate()
            .filter(|(k, _)| *k != central)
            .map(|(_, b)| {
                let mu = sc.parameters.g * (center.m + b.m);
                let osc = state_to_elements(&(b.x - center.x), &(b.v - center.v), mu);
                (b.name.clone(), osc)
            })
            .collect()
    }

    fn log_report(&self) {
        let report = self.report();
        let d_e = report.energy_drift.unwrap_or(0.0);
        let d_h = report.angular_momentum_drift.unwrap_or(0.0);
        let p = report.linear_momentum.norm();
        if d_e.abs() > DRIFT_WARN {
            warn!(step = self.steps, t = self.time(), d_energy = d_e, d_ang_mom = d_h, momentum = p, "energy drift is large, consider a smaller dt");
        } else {
            info!(step = self.steps, t = self.time(), d_energy = d_e, d_ang_mom = d_h, momentum = p, "diagnostics");
        }
    }
}
