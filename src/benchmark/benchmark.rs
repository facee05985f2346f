use std::hint::black_box;
use std::time::Instant;

use crate::simulation::forces::{compute_accelerations, AccelSet, NewtonianGravity};
use crate::simulation::integrator::{prime_accelerations, step};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, System};

/// Helper to build a manual System of size `n`: one heavy central body
/// plus `n - 1` light bodies on a deterministic spiral
fn make_system(n: usize) -> System {
    let mut bodies = Vec::with_capacity(n);
    bodies.push(Body::new("star", 1.0, 0.0, NVec3::zeros(), NVec3::zeros()));

    for i in 1..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let r = 0.3 + 0.05 * i_f;
        let phi = i_f * 2.399;
        let x = NVec3::new(r * phi.cos(), r * phi.sin(), 0.01 * (i_f * 0.07).sin());
        let speed = (4.0 * std::f64::consts::PI * std::f64::consts::PI / r).sqrt();
        let v = NVec3::new(-speed * phi.sin(), speed * phi.cos(), 0.0);

        bodies.push(Body::new(format!("b{i}"), 1e-6, 0.0, x, v));
    }

    System::new(bodies)
}

/// Time direct force evaluation and full Verlet steps (with and without the
/// 1PN correction) for growing body counts; prints one row per `n`
pub fn bench_step() {
    let ns = [10, 50, 100, 200, 400, 800];
    let steps = 20; // integrator steps per measurement

    let params = Parameters::default();
    let forces = AccelSet::from_parameters(&params);
    let gravity = NewtonianGravity { g: params.g, eps2: params.eps2() };

    println!("{:>6} {:>14} {:>14} {:>14}", "N", "force [ms]", "step [ms]", "step+PN [ms]");

    for n in ns {
        let sys = make_system(n);

        // Warm up
        black_box(compute_accelerations(&sys, &gravity));

        let t0 = Instant::now();
        for _ in 0..steps {
            black_box(compute_accelerations(black_box(&sys), &gravity));
        }
        let ms_force = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let ms_plain = time_steps(&sys, &forces, &params, false, steps);
        let ms_pn = time_steps(&sys, &forces, &params, true, steps);

        println!("{:>6} {:>14.6} {:>14.6} {:>14.6}", n, ms_force, ms_plain, ms_pn);
    }
}

fn time_steps(template: &System, forces: &AccelSet, params: &Parameters, relativistic: bool, steps: usize) -> f64 {
    let mut sys = template.clone();
    prime_accelerations(&mut sys, forces, relativistic);

    let t = Instant::now();
    for _ in 0..steps {
        step(&mut sys, forces, params.dt, relativistic);
    }
    black_box(&sys);
    t.elapsed().as_secs_f64() * 1000.0 / steps as f64
}
