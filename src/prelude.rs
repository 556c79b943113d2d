pub use nalgebra as na;

pub type Scalar = f32;
/// Wider precision used for distance comparisons.
pub type Wide = f64;

pub type Vec3 = na::Vector3<Scalar>;
pub type Color = palette::Srgb<Scalar>;

pub use crate::{
    System,
    body::Body,
    config::{Axis, Boundary, GravityConfig, SimConfig},
    error::{SimError, SimResult},
    physics::{Physics, SimState, StepReport},
};
