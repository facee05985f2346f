//! Force / acceleration contributors for the n-body engine
//!
//! Accelerations are composed into an explicit [`Accelerations`] buffer:
//! base terms (direct Newtonian gravity) run first, correction terms
//! (the 1PN term in `relativity`) add on top of them when requested

use std::ops::{Index, IndexMut};

use crate::simulation::params::Parameters;
use crate::simulation::relativity::PostNewtonian;
use crate::simulation::states::{NVec3, System};

/// Per-body acceleration accumulator for one force evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Accelerations {
    values: Vec<NVec3>,
    pn_applied: bool,
}

impl Accelerations {
    /// `n` zero vectors
    pub fn zeroed(n: usize) -> Self {
        Self {
            values: vec![NVec3::zeros(); n],
            pn_applied: false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NVec3> {
        self.values.iter()
    }

    /// Whether the post-Newtonian correction has been added to this buffer
    pub fn pn_applied(&self) -> bool {
        self.pn_applied
    }

    pub(crate) fn mark_pn_applied(&mut self) {
        self.pn_applied = true;
    }
}

impl Index<usize> for Accelerations {
    type Output = NVec3;

    fn index(&self, i: usize) -> &NVec3 {
        &self.values[i]
    }
}

impl IndexMut<usize> for Accelerations {
    fn index_mut(&mut self, i: usize) -> &mut NVec3 {
        &mut self.values[i]
    }
}

/// Trait for acceleration sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, t: f64, sys: &System, out: &mut Accelerations);
}

/// Collection of acceleration terms
/// `terms` always contribute; `corrections` are added after them only
/// when the caller asks for it on that evaluation
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
    corrections: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
            corrections: Vec::new(),
        }
    }

    /// Newtonian gravity plus the 1PN correction around `params.central`
    pub fn from_parameters(params: &Parameters) -> Self {
        Self::new()
            .with(NewtonianGravity {
                g: params.g,
                eps2: params.eps2(),
            })
            .with_correction(PostNewtonian {
                g: params.g,
                c: params.c,
                eps2: params.eps2(),
                central: params.central,
            })
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Add a correction term, applied after all regular terms
    pub fn with_correction(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.corrections.push(Box::new(term));
        self
    }

    /// Compute total accelerations at time `t` for all bodies in `sys`
    /// - the buffer starts from zero on every call
    /// - corrections run strictly after the regular terms
    pub fn accumulate_accels(&self, t: f64, sys: &System, apply_corrections: bool) -> Accelerations {
        let mut out = Accelerations::zeroed(sys.bodies.len());
        for term in &self.terms {
            term.acceleration(t, sys, &mut out);
        }
        if apply_corrections {
            for term in &self.corrections {
                term.acceleration(t, sys, &mut out);
            }
        }
        out
    }
}

/// Newtonian gravity with a single fixed softening (direct n^2 sum)
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
    pub eps2: f64, // squared softening length
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut Accelerations) {
        let n = sys.bodies.len();
        if n == 0 { // No bodies, return
            return;
        }

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let bi = &sys.bodies[i];
            let xi = bi.x; // position of body i
            let mi = bi.m; // mass of body i

            for j in (i + 1)..n {
                let bj = &sys.bodies[j];
                let xj = bj.x; // position of body j
                let mj = bj.m; // mass of body j

                // r points from i to j: i is pulled along +r, j along -r
                let r = xj - xi;

                // Softened squared distance d2 = |r|^2 + eps^2
                let d2 = r.dot(&r) + self.eps2;

                // coef = G / d^3
                let inv_d = d2.sqrt().recip();
                let coef = self.g * inv_d * inv_d * inv_d;

                // a_i +=  G m_j r / d^3
                // a_j += -G m_i r / d^3
                out[i] += coef * mj * r;
                out[j] -= coef * mi * r;
            }
        }
    }
}

/// Fresh Newtonian accelerations for every body of `sys`
pub fn compute_accelerations(sys: &System, gravity: &NewtonianGravity) -> Accelerations {
    let mut out = Accelerations::zeroed(sys.bodies.len());
    gravity.acceleration(sys.t, sys, &mut out);
    out
}
