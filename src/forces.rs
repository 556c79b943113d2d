//! Optional acceleration contributors.
//!
//! Nothing here runs unless `SimConfig::gravity` is set. Contributions are
//! summed per body into a scratch buffer and handed to the integrator; they
//! never touch the stored `acc` field.

use crate::collision::{distance, pairs};
use crate::prelude::*;

/// Something that adds acceleration to bodies for the current tick.
pub trait Acceleration {
    fn acceleration(&self, bodies: &[Body], skip: &dyn Fn(usize) -> bool, out: &mut [Vec3]);
}

/// Sum of all registered contributors.
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Zeroes `out`, then lets every term add into it.
    pub fn accumulate(&self, bodies: &[Body], skip: &dyn Fn(usize) -> bool, out: &mut [Vec3]) {
        for a in out.iter_mut() {
            *a = Vec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(bodies, skip, out);
        }
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Scalar magnitude of the attraction between two bodies. Zero when the
/// centres coincide.
pub fn gravity_force(g: f64, a: &Body, b: &Body) -> f64 {
    let d = distance(a, b);
    if d == 0.0 {
        return 0.0;
    }
    g * a.mass() as f64 * b.mass() as f64 / (d * d)
}

/// Direct pairwise Newtonian attraction.
pub struct NewtonianGravity {
    pub g: f64,
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, bodies: &[Body], skip: &dyn Fn(usize) -> bool, out: &mut [Vec3]) {
        for (i, j) in pairs(bodies.len()) {
            if skip(i) || skip(j) {
                continue;
            }
            let (bi, bj) = (&bodies[i], &bodies[j]);
            let f = gravity_force(self.g, bi, bj);
            if f == 0.0 {
                continue;
            }
            // unit vector from i towards j
            let r = (bj.pos - bi.pos).map(|c| c as f64).normalize();
            out[i] += (r * (f / bi.mass() as f64)).map(|c| c as Scalar);
            out[j] -= (r * (f / bj.mass() as f64)).map(|c| c as Scalar);
        }
    }
}
