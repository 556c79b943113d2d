//! Scenes loaded from YAML, and the built-in three-ball scene.
//!
//! ```yaml
//! sim:
//!   speed: 3.0
//! bodies:
//!   - name: "Ball One"
//!     mass: 1.0
//!     radius: 0.3
//!     position: [1.0, 0.0, 0.0]
//!     velocity: [0.0, 0.0, 0.0]   # optional
//!     color: [0.1, 0.54, 1.0]     # optional
//!   - name: "Light"
//!     radius: 0.105
//!     position: [3.0, 3.0, 2.0]
//!     light: true
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::prelude::*;

fn default_mass() -> Scalar {
    1.0
}

/// Initial state for one body.
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_mass")]
    pub mass: Scalar,
    pub radius: Scalar,
    pub position: Vec<Scalar>,
    #[serde(default)]
    pub velocity: Option<Vec<Scalar>>,
    #[serde(default)]
    pub acceleration: Option<Vec<Scalar>>,
    #[serde(default)]
    pub color: Option<Vec<Scalar>>,
    /// At most one body should set this.
    #[serde(default)]
    pub light: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Scenario {
    #[serde(default)]
    pub sim: SimConfig,
    pub bodies: Vec<BodyConfig>,
}

fn vec3(body: &str, field: &'static str, v: &[Scalar]) -> SimResult<Vec3> {
    match v {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(SimError::BadVector {
            body: body.to_string(),
            field,
            got: v.len(),
        }),
    }
}

impl BodyConfig {
    pub fn build(&self) -> SimResult<Body> {
        let mut body = Body::new(self.mass, self.radius)?
            .with_name(self.name.clone())
            .with_position(vec3(&self.name, "position", &self.position)?);
        if let Some(v) = &self.velocity {
            body.vel = vec3(&self.name, "velocity", v)?;
        }
        if let Some(a) = &self.acceleration {
            body.acc = vec3(&self.name, "acceleration", a)?;
        }
        if let Some(c) = &self.color {
            let c = vec3(&self.name, "color", c)?;
            body.color = Color::new(c.x, c.y, c.z);
        }
        Ok(body)
    }
}

impl Scenario {
    pub fn from_yaml(src: &str) -> SimResult<Self> {
        Ok(serde_yaml::from_str(src)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Three balls on a unit triangle in the xz-plane and a small light
    /// sphere above them.
    pub fn three_body() -> Self {
        let ball = |name: &str, position: [Scalar; 3]| BodyConfig {
            name: name.to_string(),
            mass: 1.0,
            radius: 0.3,
            position: position.to_vec(),
            velocity: None,
            acceleration: None,
            color: None,
            light: false,
        };
        let mut light = ball("Light", [3.0, 3.0, 2.0]);
        light.radius = 0.105;
        light.color = Some(vec![1.0, 1.0, 1.0]);
        light.light = true;

        Scenario {
            sim: SimConfig::default(),
            bodies: vec![
                ball("Ball One", [1.0, 0.0, 0.0]),
                ball("Ball Two", [-0.5, 0.0, 0.866_025_4]),
                ball("Ball Three", [-0.5, 0.0, -0.866_025_4]),
                light,
            ],
        }
    }

    /// Validates everything and builds the scene. The first body marked
    /// `light` becomes the light source.
    pub fn build(&self) -> SimResult<System> {
        let mut system = System::new(self.sim.clone())?;
        let mut light = None;
        for bc in &self.bodies {
            let index = system.add(bc.build()?);
            if bc.light && light.is_none() {
                light = Some(index);
            }
        }
        system.set_light(light)?;
        Ok(system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_scene() {
        let sys = Scenario::three_body().build().unwrap();
        assert_eq!(sys.bodies().len(), 4);
        assert_eq!(sys.light(), Some(3));
        assert_eq!(sys.light_position(), Vec3::new(3.0, 3.0, 2.0));
        assert_eq!(sys.bodies()[0].name, "Ball One");
        assert_eq!(sys.bodies()[1].radius(), 0.3);
    }

    #[test]
    fn yaml_scene() {
        let src = r#"
sim:
  speed: 1.0
  boundary: ~
bodies:
  - name: a
    radius: 1.0
    position: [0.0, 0.0, 0.0]
    velocity: [1.0, 0.0, 0.0]
  - name: b
    mass: 2.0
    radius: 1.0
    position: [4.0, 0.0, 0.0]
    color: [1.0, 0.0, 0.0]
"#;
        let sc = Scenario::from_yaml(src).unwrap();
        assert_eq!(sc.sim.boundary, None);
        let sys = sc.build().unwrap();
        assert_eq!(sys.light(), None);
        assert_eq!(sys.bodies()[0].vel, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(sys.bodies()[1].mass(), 2.0);
        assert_eq!(sys.bodies()[1].color, Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn short_vector_rejected() {
        let src = "bodies:\n  - name: a\n    radius: 1.0\n    position: [0.0, 1.0]\n";
        let err = Scenario::from_yaml(src).unwrap().build().err().unwrap();
        assert!(matches!(err, SimError::BadVector { field: "position", got: 2, .. }));
    }

    #[test]
    fn bad_mass_rejected() {
        let src = "bodies:\n  - radius: 1.0\n    mass: 0.0\n    position: [0.0, 0.0, 0.0]\n";
        let err = Scenario::from_yaml(src).unwrap().build().err().unwrap();
        assert!(matches!(err, SimError::InvalidMass(_)));
    }
}
