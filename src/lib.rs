use log::debug;

use crate::prelude::*;

pub mod body;
pub mod clock;
pub mod collision;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod physics;
pub mod prelude;
pub mod scenario;

/// Light position used when no body is designated as the light source.
pub const DEFAULT_LIGHT: [Scalar; 3] = [5.0, 5.0, 5.0];

/// The scene: one owned arena of bodies plus the driver that steps it.
///
/// Physics borrows the arena mutably for the length of a tick; the
/// renderer reads it through [`System::bodies`] between ticks.
pub struct System {
	bodies: Vec<Body>,
	light: Option<usize>,
	physics: Physics,
}

impl System {
	pub fn new(config: SimConfig) -> SimResult<Self> {
		Ok(System {
			bodies: Vec::new(),
			light: None,
			physics: Physics::new(config)?,
		})
	}

	/// Adds a body and returns its index.
	pub fn add(&mut self, body: Body) -> usize {
		debug!("adding body {} ({})", self.bodies.len(), body.name);
		self.bodies.push(body);
		self.bodies.len() - 1
	}

	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	pub fn bodies_mut(&mut self) -> &mut [Body] {
		&mut self.bodies
	}

	pub fn body(&self, index: usize) -> Option<&Body> {
		self.bodies.get(index)
	}

	pub fn physics(&self) -> &Physics {
		&self.physics
	}

	/// Choose which body lights the scene. Set once during setup.
	pub fn set_light(&mut self, index: Option<usize>) -> SimResult<()> {
		if let Some(i) = index {
			if i >= self.bodies.len() {
				return Err(SimError::BadLight(i));
			}
		}
		self.light = index;
		Ok(())
	}

	pub fn light(&self) -> Option<usize> {
		self.light
	}

	pub fn light_position(&self) -> Vec3 {
		self.light
			.and_then(|i| self.bodies.get(i))
			.map(|b| b.pos)
			.unwrap_or_else(|| Vec3::from(DEFAULT_LIGHT))
	}

	pub fn push(&mut self, index: usize, force: Vec3) -> SimResult<()> {
		self.physics.push(&mut self.bodies, index, force)
	}

	pub fn step(&mut self) -> SimResult<StepReport> {
		self.physics.step(&mut self.bodies)
	}

	pub fn should_close(&self) -> bool {
		self.physics.should_close()
	}

	pub fn total_momentum(&self) -> Vec3 {
		self.bodies.iter().map(Body::momentum).sum()
	}

	pub fn kinetic_energy(&self) -> Scalar {
		self.bodies.iter().map(Body::kinetic_energy).sum()
	}
}
