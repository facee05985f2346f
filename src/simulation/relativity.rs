//! Leading-order post-Newtonian (1PN) correction around one dominant mass
//!
//! Weak-field, slow-motion limit of the Schwarzschild field for a test body
//! at separation r and relative velocity v from a central mass M:
//!
//! ```text
//! a_PN = GM / (c^2 r^3) * [ (4GM/r - v^2) r + 4 (r . v) v ]
//! ```
//!
//! This is the term responsible for Mercury's ~43"/century perihelion
//! advance. Body-body relativistic cross terms are left out.

use crate::simulation::forces::{Acceleration, Accelerations};
use crate::simulation::states::System;

/// 1PN correction relative to `sys.bodies[central]`
#[derive(Debug, Clone, Copy)]
pub struct PostNewtonian {
    pub g: f64, // gravitational constant
    pub c: f64, // speed of light, same unit system
    pub eps2: f64, // squared softening, same as the Newtonian term
    pub central: usize, // index of the dominant mass
}

impl Acceleration for PostNewtonian {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut Accelerations) {
        compute_pn_corrections(sys, self, out);
    }
}

/// Add the 1PN correction of every non-central body into `out`
///
/// `out` must already hold the Newtonian accelerations for the same state.
/// Applying it twice to one buffer is a no-op, and a `central` index outside
/// the collection leaves `out` untouched.
pub fn compute_pn_corrections(sys: &System, pn: &PostNewtonian, out: &mut Accelerations) {
    if out.pn_applied() {
        return;
    }
    let Some(center) = sys.bodies.get(pn.central) else {
        return;
    };

    let gm = pn.g * center.m;
    let c2 = pn.c * pn.c;

    for (k, b) in sys.bodies.iter().enumerate() {
        if k == pn.central {
            continue;
        }

        // State relative to the central body
        let r_vec = b.x - center.x;
        let v_vec = b.v - center.v;

        // Softened radius, consistent with the Newtonian term
        let r = (r_vec.norm_squared() + pn.eps2).sqrt();
        let v2 = v_vec.norm_squared();
        let rv = r_vec.dot(&v_vec);

        let factor = gm / (c2 * r * r * r);
        out[k] += factor * ((4.0 * gm / r - v2) * r_vec + 4.0 * rv * v_vec);
    }

    out.mark_pn_applied();
}
