//! Fixed-step velocity-Verlet integrator
//!
//! One step is kick / drift / force / kick. The acceleration from the end
//! of a step is stored on the bodies and reused for the first half-kick of
//! the next one, so every step costs a single force evaluation. The scheme
//! is symmetric: stepping with `-dt` retraces the trajectory.

use super::forces::AccelSet;
use super::states::System;

/// Fill every body's stored acceleration for the current state
/// Call once before the first [`step`], and again after editing positions
/// or toggling the correction if the next step must start consistent
pub fn prime_accelerations(sys: &mut System, forces: &AccelSet, relativistic: bool) {
    let acc = forces.accumulate_accels(sys.t, &*sys, relativistic);
    for (b, a) in sys.bodies.iter_mut().zip(acc.iter()) {
        b.a = *a;
    }
}

/// Advance the system by one step of size `dt` (may be negative)
/// - `relativistic` adds the correction terms of `forces` for this step
/// - positions, velocities, accelerations and `sys.t` are updated in place
pub fn step(sys: &mut System, forces: &AccelSet, dt: f64, relativistic: bool) {
    if sys.bodies.is_empty() { // no bodies, only the clock moves
        sys.t += dt;
        return;
    }

    let half_dt = 0.5 * dt; // half step dt/2

    // Kick: v_n+1/2 = v_n + (dt/2) a_n
    for b in sys.bodies.iter_mut() {
        b.v += half_dt * b.a;
    }

    // Drift: x_n+1 = x_n + dt v_n+1/2
    for b in sys.bodies.iter_mut() {
        b.x += dt * b.v;
    }

    // advance time: t_n+1 = t_n + dt
    sys.t += dt;

    // a_n+1 from x_n+1, correction (if any) added after the Newtonian part
    let a_new = forces.accumulate_accels(sys.t, &*sys, relativistic);

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) a_n+1
    for (b, a) in sys.bodies.iter_mut().zip(a_new.iter()) {
        b.v += half_dt * *a;
        b.a = *a;
    }
}
