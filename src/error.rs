//! Error types for the simulator core.

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// Timestep must be finite and strictly positive.
    #[error("invalid timestep: {0} (must be > 0)")]
    InvalidTimestep(f32),

    #[error("invalid speed multiplier: {0} (must be finite and >= 0)")]
    InvalidSpeed(f32),

    /// Decay rate would give a factor outside (0, 1].
    #[error("invalid {which} decay rate: {rate} (must be finite and >= 0)")]
    InvalidDecay { which: &'static str, rate: f32 },

    #[error("invalid {which} tolerance: {value} (must be finite and >= 0)")]
    InvalidTolerance { which: &'static str, value: f32 },

    #[error("invalid mass: {0} (must be > 0)")]
    InvalidMass(f32),

    #[error("invalid radius: {0} (must be >= 0)")]
    InvalidRadius(f32),

    #[error("invalid boundary threshold: {0}")]
    InvalidBoundary(f32),

    #[error("invalid gravitational constant: {0}")]
    InvalidGravity(f64),

    /// Stepping after the boundary predicate fired.
    #[error("simulation halted: step called after termination")]
    Halted,

    #[error("no body at index {0}")]
    UnknownBody(usize),

    #[error("non-finite force pushed onto body {0}")]
    NonFiniteForce(usize),

    #[error("scenario io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("body `{body}`: `{field}` needs 3 components, got {got}")]
    BadVector {
        body: String,
        field: &'static str,
        got: usize,
    },

    #[error("light index {0} is out of range")]
    BadLight(usize),
}
