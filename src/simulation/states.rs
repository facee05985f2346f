//! Core state types for the N-body simulation.
//!
//! - `Body`   one point mass with position, velocity and last acceleration
//! - `System` the body collection plus the current simulation time `t`
//!
//! Everything is in AU, years and solar masses (see `constants`).

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub x: NVec3, // position (AU)
    pub v: NVec3, // velocity (AU/yr)
    pub a: NVec3, // acceleration at the end of the last step (AU/yr^2)
    pub m: f64, // mass (M_sun)
    pub radius: f64, // physical radius (AU), display only
}

impl Body {
    /// Body with zero acceleration; the integrator fills `a` when primed
    pub fn new(name: impl Into<String>, m: f64, radius: f64, x: NVec3, v: NVec3) -> Self {
        Self {
            name: name.into(),
            x,
            v,
            a: NVec3::zeros(),
            m,
            radius,
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }

    pub fn momentum(&self) -> NVec3 {
        self.m * self.v
    }

    /// Angular momentum about `origin`
    pub fn angular_momentum_about(&self, origin: &NVec3) -> NVec3 {
        self.m * (self.x - origin).cross(&self.v)
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.x - other.x).norm()
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // collection of bodies
    pub t: f64, // time (yr)
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    /// Case-insensitive lookup
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.bodies
            .iter()
            .position(|b| b.name.eq_ignore_ascii_case(name))
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.index_of(name).map(|i| &self.bodies[i])
    }

    /// Center-of-mass position and velocity, zero for a massless system
    pub fn center_of_mass(&self) -> (NVec3, NVec3) {
        let total = self.total_mass();
        if total == 0.0 {
            return (NVec3::zeros(), NVec3::zeros());
        }

        let mut x = NVec3::zeros();
        let mut v = NVec3::zeros();
        for b in &self.bodies {
            x += b.m * b.x;
            v += b.m * b.v;
        }
        (x / total, v / total)
    }

    /// Shift the frame so the barycenter sits at rest at the origin
    pub fn move_to_barycenter(&mut self) {
        let (x_cm, v_cm) = self.center_of_mass();
        for b in self.bodies.iter_mut() {
            b.x -= x_cm;
            b.v -= v_cm;
        }
    }
}
