use crate::prelude::*;

pub const DEFAULT_COLOR: (Scalar, Scalar, Scalar) = (0.1, 0.54, 1.0);

/// A sphere taking part in the simulation.
///
/// Kinematic fields are public so the renderer and the caller can read them
/// directly. Mass and radius go through validated setters.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub color: Color,
    pub pos: Vec3,
    pub vel: Vec3,
    pub acc: Vec3,
    /// Impulses pushed since the last tick. Cleared by the integrator.
    pub force: Vec3,
    mass: Scalar,
    radius: Scalar,
}

impl Body {
    pub fn new(mass: Scalar, radius: Scalar) -> SimResult<Self> {
        check_mass(mass)?;
        check_radius(radius)?;
        let (r, g, b) = DEFAULT_COLOR;
        Ok(Body {
            name: String::new(),
            color: Color::new(r, g, b),
            pos: Vec3::zeros(),
            vel: Vec3::zeros(),
            acc: Vec3::zeros(),
            force: Vec3::zeros(),
            mass,
            radius,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_position(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_velocity(mut self, vel: Vec3) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_acceleration(mut self, acc: Vec3) -> Self {
        self.acc = acc;
        self
    }

    pub fn mass(&self) -> Scalar {
        self.mass
    }

    pub fn radius(&self) -> Scalar {
        self.radius
    }

    pub fn set_mass(&mut self, mass: Scalar) -> SimResult<()> {
        check_mass(mass)?;
        self.mass = mass;
        Ok(())
    }

    pub fn set_radius(&mut self, radius: Scalar) -> SimResult<()> {
        check_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    /// Impulse semantics: the force is recorded and `F / m` is added to the
    /// velocity straight away.
    pub fn push(&mut self, force: Vec3) {
        self.force += force;
        self.vel += force / self.mass;
    }

    pub fn momentum(&self) -> Vec3 {
        self.vel * self.mass
    }

    pub fn kinetic_energy(&self) -> Scalar {
        0.5 * self.mass * self.vel.norm_squared()
    }

    pub fn is_finite(&self) -> bool {
        let finite = |v: &Vec3| v.iter().all(|c| c.is_finite());
        finite(&self.pos) && finite(&self.vel) && finite(&self.acc)
    }
}

fn check_mass(mass: Scalar) -> SimResult<()> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidMass(mass))
    }
}

fn check_radius(radius: Scalar) -> SimResult<()> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidRadius(radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_mass_and_radius() {
        assert!(matches!(Body::new(0.0, 1.0), Err(SimError::InvalidMass(_))));
        assert!(matches!(Body::new(-2.0, 1.0), Err(SimError::InvalidMass(_))));
        assert!(matches!(Body::new(Scalar::NAN, 1.0), Err(SimError::InvalidMass(_))));
        assert!(matches!(Body::new(1.0, -0.1), Err(SimError::InvalidRadius(_))));
        assert!(Body::new(1.0, 0.0).is_ok());
    }

    #[test]
    fn setters_keep_old_value_on_error() {
        let mut b = Body::new(2.0, 0.5).unwrap();
        assert!(b.set_mass(0.0).is_err());
        assert_eq!(b.mass(), 2.0);
        assert!(b.set_radius(-1.0).is_err());
        assert_eq!(b.radius(), 0.5);
    }

    #[test]
    fn push_is_an_impulse() {
        let mut b = Body::new(2.0, 0.5).unwrap();
        b.push(Vec3::new(4.0, 0.0, -2.0));
        assert_eq!(b.vel, Vec3::new(2.0, 0.0, -1.0));
        assert_eq!(b.force, Vec3::new(4.0, 0.0, -2.0));

        // a second push does not re-apply the first one
        b.push(Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(b.vel, Vec3::new(3.0, 0.0, -1.0));
    }

    #[test]
    fn finiteness() {
        let mut b = Body::new(1.0, 1.0).unwrap();
        assert!(b.is_finite());
        b.vel.y = Scalar::INFINITY;
        assert!(!b.is_finite());
    }
}
