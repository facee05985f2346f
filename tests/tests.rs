use orbsim::simulation::constants::G;
use orbsim::simulation::diagnostics::linear_momentum;
use orbsim::simulation::kepler::angle_diff;
use orbsim::{
    elements_to_state, prime_accelerations, state_to_elements, step, total_angular_momentum, total_energy, AccelSet,
    Anomaly, Body, Engine, NVec3, NewtonianGravity, OrbitalElements, Parameters, Scenario, ScenarioConfig, System,
};

use approx::assert_relative_eq;
use std::f64::consts::PI;

/// Build a simple 2-body System separated along x-axis, both at rest
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    System::new(vec![
        Body::new("a", m1, 0.0, NVec3::new(-dist / 2.0, 0.0, 0.0), NVec3::zeros()),
        Body::new("b", m2, 0.0, NVec3::new(dist / 2.0, 0.0, 0.0), NVec3::zeros()),
    ])
}

/// Star of unit mass at the origin plus an Earth-mass body on a circular orbit of radius `r`
pub fn circular_pair(r: f64, m: f64) -> System {
    let v = (G * (1.0 + m) / r).sqrt();
    let mut sys = System::new(vec![
        Body::new("star", 1.0, 0.0, NVec3::zeros(), NVec3::zeros()),
        Body::new("planet", m, 0.0, NVec3::new(r, 0.0, 0.0), NVec3::new(0.0, v, 0.0)),
    ]);
    sys.move_to_barycenter();
    sys
}

/// Default physics parameters for tests: no softening, no relativity
pub fn test_params() -> Parameters {
    Parameters {
        eps_accel: 0.0,
        relativity: false,
        report_every: 0,
        ..Parameters::default()
    }
}

/// Build a gravity-only AccelSet
pub fn gravity_set(p: &Parameters) -> AccelSet {
    AccelSet::new().with(NewtonianGravity { g: p.g, eps2: p.eps2() })
}

fn run_steps(sys: &mut System, forces: &AccelSet, dt: f64, n: usize, relativistic: bool) {
    for _ in 0..n {
        step(sys, forces, dt, relativistic);
    }
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sys = two_body_system(1.0, 2.0, 3.0);
    let forces = gravity_set(&test_params());

    let acc = forces.accumulate_accels(sys.t, &sys, false);
    let net = acc[0] * sys.bodies[0].m + acc[1] * sys.bodies[1].m;

    assert!(net.norm() < 1e-12, "Net force not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(2.0, 1.0, 1.0);
    let forces = gravity_set(&test_params());

    let acc = forces.accumulate_accels(sys.t, &sys, false);
    let dx = sys.bodies[1].x - sys.bodies[0].x;

    assert!(acc[0].dot(&dx) > 0.0, "Acceleration is not toward second body");
    assert!(acc[1].dot(&dx) < 0.0, "Acceleration is not toward first body");
}

#[test]
fn gravity_inverse_square_law() {
    let sys_r = two_body_system(1.0, 1.0, 1.0);
    let sys_2r = two_body_system(2.0, 1.0, 1.0);
    let forces = gravity_set(&test_params());

    let acc_r = forces.accumulate_accels(sys_r.t, &sys_r, false);
    let acc_2r = forces.accumulate_accels(sys_2r.t, &sys_2r, false);

    let ratio = acc_r[0].norm() / acc_2r[0].norm();
    assert!((ratio - 4.0).abs() < 1e-9, "Expected 4x, got {}", ratio);
}

#[test]
fn gravity_softening_prevents_blowup() {
    let p = Parameters { eps_accel: 0.1, ..test_params() };
    let sys = two_body_system(1e-9, 1.0, 1.0);
    let forces = gravity_set(&p);

    let acc = forces.accumulate_accels(sys.t, &sys, false);

    assert!(acc[0].norm().is_finite());
    assert!(acc[0].norm() < 1e-3, "Softening failed; acceleration {}", acc[0].norm());
}

#[test]
fn relativity_flag_changes_only_the_orbiting_body() {
    let sys = circular_pair(0.4, 1e-7);
    let p = Parameters { relativity: true, ..test_params() };
    let forces = AccelSet::from_parameters(&p);

    let newton = forces.accumulate_accels(sys.t, &sys, false);
    let with_pn = forces.accumulate_accels(sys.t, &sys, true);

    assert!(!newton.pn_applied());
    assert!(with_pn.pn_applied());
    assert_eq!(newton[0], with_pn[0]);
    let delta = (with_pn[1] - newton[1]).norm();
    assert!(delta > 0.0 && delta < 1e-6 * newton[1].norm(), "1PN delta {delta}");
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn verlet_conserves_energy_and_angular_momentum() {
    let mut sys = circular_pair(1.0, 3.003e-6);
    let p = Parameters { eps_accel: 1e-5, ..test_params() };
    let forces = gravity_set(&p);

    prime_accelerations(&mut sys, &forces, false);
    let e0 = total_energy(&sys.bodies, p.g);
    let h0 = total_angular_momentum(&sys.bodies);

    run_steps(&mut sys, &forces, 0.001, 10_000, false);

    let e1 = total_energy(&sys.bodies, p.g);
    let h1 = total_angular_momentum(&sys.bodies);
    let d_e = ((e1 - e0) / e0).abs();
    let d_h = (h1 - h0).norm() / h0.norm();

    assert!((sys.t - 10.0).abs() < 1e-9);
    assert!(d_e < 1e-4, "energy drift {d_e}");
    assert!(d_h < 1e-4, "angular momentum drift {d_h}");
}

#[test]
fn verlet_is_time_reversible() {
    let mut sys = circular_pair(1.0, 3.003e-6);
    let start = sys.clone();
    let forces = gravity_set(&test_params());

    prime_accelerations(&mut sys, &forces, false);
    run_steps(&mut sys, &forces, 0.001, 1000, false);
    run_steps(&mut sys, &forces, -0.001, 1000, false);

    for (b, b0) in sys.bodies.iter().zip(&start.bodies) {
        assert!((b.x - b0.x).norm() < 1e-6, "{} position off by {}", b.name, (b.x - b0.x).norm());
        assert!((b.v - b0.v).norm() < 1e-6, "{} velocity off by {}", b.name, (b.v - b0.v).norm());
    }
    assert!(sys.t.abs() < 1e-12);
}

#[test]
fn circular_orbit_keeps_its_radius() {
    let mut sys = circular_pair(1.0, 3.003e-6);
    let forces = gravity_set(&test_params());

    prime_accelerations(&mut sys, &forces, false);
    run_steps(&mut sys, &forces, 0.001, 1000, false);

    let r = sys.bodies[1].distance_to(&sys.bodies[0]);
    assert!((r - 1.0).abs() < 1e-4, "separation drifted to {r}");
}

// ==================================================================================
// Orbital element tests
// ==================================================================================

#[test]
fn elements_round_trip_over_eccentricities() {
    let mu = G;
    for &e in &[0.0167, 0.1, 0.3, 0.6, 0.85] {
        let el = OrbitalElements::new(1.3, e, 0.4, 1.1, 2.2, 0.7);
        let sv = elements_to_state(&el, mu);
        let back = state_to_elements(&sv.position, &sv.velocity, mu).elements;

        assert_relative_eq!(back.a, el.a, max_relative = 1e-9);
        assert_relative_eq!(back.e, el.e, epsilon = 1e-9);
        assert_relative_eq!(back.i, el.i, epsilon = 1e-9);
        assert!(angle_diff(back.raan, el.raan).abs() < 1e-9);
        assert!(angle_diff(back.arg_periapsis, el.arg_periapsis).abs() < 1e-7, "e = {e}");
        assert!(angle_diff(back.mean_anomaly(), el.mean_anomaly()).abs() < 1e-7, "e = {e}");
    }
}

#[test]
fn circular_equatorial_orbit_is_well_defined() {
    let mu = G;
    let v = mu.sqrt();
    let osc = state_to_elements(&NVec3::new(0.0, 1.0, 0.0), &NVec3::new(-v, 0.0, 0.0), mu);
    let el = osc.elements;

    assert_relative_eq!(el.a, 1.0, max_relative = 1e-12);
    assert!(el.e < 1e-12);
    assert_eq!(el.i, 0.0);
    assert_eq!(el.raan, 0.0);
    assert_eq!(el.arg_periapsis, 0.0);
    // true longitude of (0, 1, 0)
    assert_relative_eq!(osc.true_anomaly, PI / 2.0, epsilon = 1e-12);
    assert!(matches!(el.anomaly, Anomaly::Mean(_)));
    assert!(el.raan.is_finite() && el.arg_periapsis.is_finite());
}

// ==================================================================================
// Relativity tests
// ==================================================================================

fn mercury_periapsis_shift(relativistic: bool) -> f64 {
    let m_merc = 1.66e-7;
    let mu = G * (1.0 + m_merc);
    let el = OrbitalElements::new(0.387, 0.206, 0.122, 0.843, 0.508, 0.0);
    let sv = elements_to_state(&el, mu);

    let mut sys = System::new(vec![
        Body::new("Sun", 1.0, 0.0, NVec3::zeros(), NVec3::zeros()),
        Body::new("Mercury", m_merc, 0.0, sv.position, sv.velocity),
    ]);
    sys.move_to_barycenter();

    let p = Parameters { relativity: relativistic, ..test_params() };
    let forces = AccelSet::from_parameters(&p);

    let n = 2000;
    let dt = el.period(mu) / n as f64;
    prime_accelerations(&mut sys, &forces, relativistic);
    run_steps(&mut sys, &forces, dt, n, relativistic);

    let (sun, merc) = (&sys.bodies[0], &sys.bodies[1]);
    state_to_elements(&(merc.x - sun.x), &(merc.v - sun.v), mu).elements.arg_periapsis
}

#[test]
fn relativity_advances_mercury_perihelion() {
    let with_pn = mercury_periapsis_shift(true);
    let newton = mercury_periapsis_shift(false);
    let shift = angle_diff(with_pn, newton);

    // 6 pi G M / (c^2 a (1 - e^2)) is about 5.0e-7 rad per orbit
    assert!(shift > 1e-7 && shift < 2e-6, "perihelion shift per orbit {shift}");
}

// ==================================================================================
// Scenario / engine tests
// ==================================================================================

const TWO_PLANETS: &str = r#"
parameters:
  t_end: 0.2
  dt: 0.001
  relativity: true
  report_every: 0
  angles: degrees
central: { name: Sun, mass: 1.0, radius: 0.00465 }
planets:
  - { name: Mercury, a: 0.387, e: 0.2056, i: 7.0, Omega: 48.3, omega: 29.1, M: 174.8, mass: 1.66e-7, radius: 1.63e-5 }
  - { name: Earth, a: 1.0, e: 0.0167, i: 0.0, Omega: 0.0, omega: 102.9, M: 357.5, mass: 3.003e-6, radius: 4.26e-5 }
"#;

#[test]
fn engine_runs_a_configured_scenario() {
    let cfg = ScenarioConfig::from_yaml_str(TWO_PLANETS).unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();
    assert_eq!(scenario.system.len(), 3);

    let mut engine = Engine::new(scenario);
    let report = engine.run();

    assert_eq!(engine.steps(), 200);
    assert!(report.energy < 0.0);
    assert!(report.energy_drift.unwrap().abs() < 1e-3);

    let elems = engine.osculating();
    let names: Vec<&str> = elems.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["Mercury", "Earth"]);
    assert_relative_eq!(elems[0].1.elements.a, 0.387, max_relative = 1e-3);
    assert_relative_eq!(elems[1].1.elements.e, 0.0167, epsilon = 1e-3);
}

#[test]
fn bundled_scenarios_parse_and_build() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    for (file, bodies) in [("solar_system.yaml", 9), ("sun_earth.yaml", 2)] {
        let cfg = ScenarioConfig::from_path(&dir.join(file)).unwrap();
        let scenario = Scenario::build_scenario(cfg).unwrap();
        assert_eq!(scenario.system.len(), bodies, "{file}");

        let (_, v_cm) = scenario.system.center_of_mass();
        assert!(v_cm.norm() < 1e-12, "{file} not barycentric");
    }
}

#[test]
fn bundled_solar_system_has_zero_momentum() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/solar_system.yaml");
    let scenario = Scenario::build_scenario(ScenarioConfig::from_path(&path).unwrap()).unwrap();

    let p = linear_momentum(&scenario.system.bodies);
    let jupiter = scenario.system.body("jupiter").unwrap().momentum().norm();
    assert!(p.norm() < 1e-12 * jupiter.max(1.0), "momentum {}", p.norm());
}

#[test]
fn run_summary_serializes_to_yaml() {
    let params = Parameters { t_end: 0.05, ..test_params() };
    let mut engine = Engine::new(Scenario::sun_earth().with_parameters(params));
    let report = engine.run();

    let text = serde_yaml::to_string(&report).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
    assert_eq!(value["energy"].as_f64(), Some(report.energy));
    assert!(value["energy_drift"].as_f64().is_some());
    assert!(value["linear_momentum"].is_sequence());

    let (name, osc) = &engine.osculating()[0];
    assert_eq!(name, "Earth");
    let text = serde_yaml::to_string(osc).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
    assert_eq!(value["elements"]["a"].as_f64(), Some(osc.elements.a));
    assert!(value["period"].as_f64().is_some());
}
