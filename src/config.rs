//! Simulation-wide settings.
//!
//! `SimConfig` is deserializable so it can sit at the top of a scenario
//! file. Every field has a default, so a scenario only lists what it
//! overrides:
//!
//! ```yaml
//! sim:
//!   dt: 0.0166667          # fixed tick length, seconds
//!   speed: 3.0             # position multiplier
//!   velocity_decay: 0.5    # lambda_v, 1/s
//!   accel_decay: 0.9       # lambda_a, 1/s
//!   zero_tolerance: 1.0e-6
//!   collision_tolerance: 1.0e-6
//!   boundary: { axis: x, threshold: 20.0 }
//!   gravity: { g: 6.6743e-11 }   # omit to leave gravity off
//! ```

use serde::Deserialize;

use crate::prelude::*;

pub const GRAV_CONST: f64 = 6.67430e-11;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Terminates the run once a body reaches `threshold` on `axis`.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub axis: Axis,
    pub threshold: Scalar,
}

impl Boundary {
    pub fn crossed(&self, pos: &Vec3) -> bool {
        pos[self.axis.index()] >= self.threshold
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Boundary {
            axis: Axis::X,
            threshold: 20.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GravityConfig {
    #[serde(default = "default_g")]
    pub g: f64,
}

fn default_g() -> f64 {
    GRAV_CONST
}

impl Default for GravityConfig {
    fn default() -> Self {
        GravityConfig { g: GRAV_CONST }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub dt: Scalar,
    pub speed: Scalar,
    pub velocity_decay: Scalar,
    pub accel_decay: Scalar,
    /// Component-wise threshold below which a vector snaps to zero.
    pub zero_tolerance: Scalar,
    /// Slack added to the squared contact distance.
    pub collision_tolerance: Scalar,
    /// `None` runs forever.
    pub boundary: Option<Boundary>,
    /// Off unless set.
    pub gravity: Option<GravityConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            dt: 1.0 / 60.0,
            speed: 3.0,
            velocity_decay: 0.5,
            accel_decay: 0.9,
            zero_tolerance: 1e-6,
            collision_tolerance: 1e-6,
            boundary: Some(Boundary::default()),
            gravity: None,
        }
    }
}

impl SimConfig {
    pub fn with_timestep(mut self, dt: Scalar, speed: Scalar) -> Self {
        self.dt = dt;
        self.speed = speed;
        self
    }

    pub fn with_boundary(mut self, boundary: Option<Boundary>) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_gravity(mut self, gravity: Option<GravityConfig>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Exponential factors applied to velocity and acceleration each tick.
    pub fn decay_factors(&self) -> (Scalar, Scalar) {
        (
            (-self.velocity_decay * self.dt).exp(),
            (-self.accel_decay * self.dt).exp(),
        )
    }

    pub fn validate(&self) -> SimResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidTimestep(self.dt));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(SimError::InvalidSpeed(self.speed));
        }
        for (which, rate) in [("velocity", self.velocity_decay), ("acceleration", self.accel_decay)] {
            if !(rate.is_finite() && rate >= 0.0) {
                return Err(SimError::InvalidDecay { which, rate });
            }
        }
        for (which, value) in [("zero", self.zero_tolerance), ("collision", self.collision_tolerance)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::InvalidTolerance { which, value });
            }
        }
        if let Some(b) = self.boundary {
            if !b.threshold.is_finite() {
                return Err(SimError::InvalidBoundary(b.threshold));
            }
        }
        if let Some(g) = self.gravity {
            if !(g.g.is_finite() && g.g >= 0.0) {
                return Err(SimError::InvalidGravity(g.g));
            }
        }
        Ok(())
    }
}
