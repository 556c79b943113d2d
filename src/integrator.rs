//! Semi-implicit Euler with exponential decay.

use crate::prelude::*;

/// Per-tick constants shared by every body, precomputed by the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub dt: Scalar,
    pub speed: Scalar,
    pub vel_factor: Scalar,
    pub acc_factor: Scalar,
    pub tolerance: Scalar,
}

impl Step {
    pub fn from_config(cfg: &SimConfig) -> Self {
        let (vel_factor, acc_factor) = cfg.decay_factors();
        Step {
            dt: cfg.dt,
            speed: cfg.speed,
            vel_factor,
            acc_factor,
            tolerance: cfg.zero_tolerance,
        }
    }
}

/// True when every component is within `tolerance` of zero. A vector that
/// passes is snapped to exact zero.
pub fn is_zero(v: &mut Vec3, tolerance: Scalar) -> bool {
    if *v == Vec3::zeros() {
        return true;
    }
    let zero = v.iter().all(|c| c.abs() <= tolerance);
    if zero {
        *v = Vec3::zeros();
    }
    zero
}

/// Advance one body by one tick. `extra` is acceleration from optional
/// force contributors and is not stored on the body.
pub fn integrate(body: &mut Body, step: &Step, extra: &Vec3) {
    body.vel += (body.acc + extra) * step.dt;
    body.pos += body.vel * step.dt * step.speed;

    if !is_zero(&mut body.vel, step.tolerance) {
        body.vel *= step.vel_factor;
    }
    if !is_zero(&mut body.acc, step.tolerance) {
        body.acc *= step.acc_factor;
    }

    body.force = Vec3::zeros();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step() -> Step {
        Step::from_config(&SimConfig::default().with_timestep(0.1, 1.0))
    }

    #[test]
    fn snaps_small_vectors() {
        let mut v = Vec3::new(1e-7, -1e-7, 0.0);
        assert!(is_zero(&mut v, 1e-6));
        assert_eq!(v, Vec3::zeros());

        let mut w = Vec3::new(1e-7, 1e-3, 0.0);
        assert!(!is_zero(&mut w, 1e-6));
        assert_eq!(w.y, 1e-3);
    }

    #[test]
    fn velocity_updated_before_position() {
        let s = step();
        let mut b = Body::new(1.0, 0.5)
            .unwrap()
            .with_acceleration(Vec3::new(10.0, 0.0, 0.0));
        integrate(&mut b, &s, &Vec3::zeros());

        // v = 10 * 0.1 = 1, x = 1 * 0.1
        assert!((b.pos.x - 0.1).abs() < 1e-6);
        assert!((b.vel.x - s.vel_factor).abs() < 1e-6);
        assert!((b.acc.x - 10.0 * s.acc_factor).abs() < 1e-5);
    }

    #[test]
    fn speed_scales_position_only() {
        let mut s = step();
        s.speed = 3.0;
        let mut b = Body::new(1.0, 0.5)
            .unwrap()
            .with_velocity(Vec3::new(2.0, 0.0, 0.0));
        integrate(&mut b, &s, &Vec3::zeros());
        assert!((b.pos.x - 0.6).abs() < 1e-6);
        assert!((b.vel.x - 2.0 * s.vel_factor).abs() < 1e-6);
    }

    #[test]
    fn extra_acceleration_is_not_stored() {
        let s = step();
        let mut b = Body::new(1.0, 0.5).unwrap();
        integrate(&mut b, &s, &Vec3::new(0.0, -1.0, 0.0));
        assert!(b.vel.y < 0.0);
        assert_eq!(b.acc, Vec3::zeros());
    }

    #[test]
    fn force_buffer_is_consumed() {
        let s = step();
        let mut b = Body::new(1.0, 0.5).unwrap();
        b.push(Vec3::new(1.0, 0.0, 0.0));
        integrate(&mut b, &s, &Vec3::zeros());
        assert_eq!(b.force, Vec3::zeros());
    }

    #[test]
    fn negligible_velocity_snaps_without_decay() {
        let s = step();
        let mut b = Body::new(1.0, 0.5)
            .unwrap()
            .with_velocity(Vec3::new(5e-7, 0.0, 0.0));
        integrate(&mut b, &s, &Vec3::zeros());
        assert_eq!(b.vel, Vec3::zeros());
    }
}
