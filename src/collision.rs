//! Sphere overlap tests and elastic response.
//!
//! Distances are compared in `f64` to keep near-tangent contacts stable;
//! body state stays in `f32`.

use crate::prelude::*;

/// Outcome of [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Normal velocities exchanged.
    Resolved,
    /// Centres coincide, no normal exists. Nothing was changed.
    Degenerate,
}

fn wide(v: &Vec3) -> na::Vector3<Wide> {
    v.map(|c| c as Wide)
}

pub fn dist2_wide(a: &Body, b: &Body) -> Wide {
    (wide(&a.pos) - wide(&b.pos)).norm_squared()
}

/// Euclidean distance between centres.
pub fn distance(a: &Body, b: &Body) -> Wide {
    dist2_wide(a, b).sqrt()
}

/// Boundary-inclusive: spheres exactly touching collide.
pub fn are_colliding(a: &Body, b: &Body, tolerance: Scalar) -> bool {
    let reach = a.radius() as Wide + b.radius() as Wide;
    dist2_wide(a, b) <= reach * reach + tolerance as Wide
}

/// Every unordered pair `(i, j)` with `i < j`.
pub fn pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
}

/// All colliding pairs, skipping indices for which `skip` is true.
pub fn detect<F>(bodies: &[Body], tolerance: Scalar, skip: F) -> Vec<(usize, usize)>
where
    F: Fn(usize) -> bool,
{
    pairs(bodies.len())
        .filter(|&(i, j)| !skip(i) && !skip(j))
        .filter(|&(i, j)| are_colliding(&bodies[i], &bodies[j], tolerance))
        .collect()
}

/// Two distinct mutable bodies out of one slice.
pub fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    assert!(i != j, "pair_mut needs two distinct indices");
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

/// Perfectly elastic exchange along the line of centres. Tangential
/// velocity is left alone and no positional correction is made.
pub fn resolve(a: &mut Body, b: &mut Body) -> Resolution {
    let d = wide(&b.pos) - wide(&a.pos);
    let len = d.norm();
    if len == 0.0 || !len.is_finite() {
        return Resolution::Degenerate;
    }
    let n = d / len;

    let (m1, m2) = (a.mass() as Wide, b.mass() as Wide);
    let v1n = wide(&a.vel).dot(&n);
    let v2n = wide(&b.vel).dot(&n);

    let total = m1 + m2;
    let v1n_new = (v1n * (m1 - m2) + v2n * 2.0 * m2) / total;
    let v2n_new = (v1n * 2.0 * m1 + v2n * (m2 - m1)) / total;

    a.vel += (n * (v1n_new - v1n)).map(|c| c as Scalar);
    b.vel += (n * (v2n_new - v2n)).map(|c| c as Scalar);

    Resolution::Resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(x: Scalar, vx: Scalar) -> Body {
        Body::new(1.0, 1.0)
            .unwrap()
            .with_position(Vec3::new(x, 0.0, 0.0))
            .with_velocity(Vec3::new(vx, 0.0, 0.0))
    }

    #[test]
    fn pairs_are_unordered_and_unique() {
        let p: Vec<_> = pairs(4).collect();
        assert_eq!(p, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert_eq!(pairs(1).count(), 0);
        assert_eq!(pairs(0).count(), 0);
    }

    #[test]
    fn touching_is_colliding() {
        let a = ball(0.0, 0.0);
        assert!(are_colliding(&a, &ball(2.0, 0.0), 1e-6));
        assert!(!are_colliding(&a, &ball(2.01, 0.0), 1e-6));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = ball(0.0, 0.0);
        let b = Body::new(1.0, 1.0).unwrap().with_position(Vec3::new(0.0, 3.0, 4.0));
        assert!((distance(&a, &b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn detect_skips_flagged_bodies() {
        let bodies = vec![ball(0.0, 0.0), ball(1.0, 0.0), ball(2.0, 0.0)];
        assert_eq!(detect(&bodies, 1e-6, |_| false), vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(detect(&bodies, 1e-6, |i| i == 1), vec![(0, 2)]);
    }

    #[test]
    fn pair_mut_either_order() {
        let mut bodies = vec![ball(0.0, 0.0), ball(1.0, 0.0), ball(2.0, 0.0)];
        {
            let (a, b) = pair_mut(&mut bodies, 2, 0);
            a.vel.x = 7.0;
            b.vel.x = -7.0;
        }
        assert_eq!(bodies[2].vel.x, 7.0);
        assert_eq!(bodies[0].vel.x, -7.0);
    }

    #[test]
    fn equal_masses_swap() {
        let mut a = ball(0.0, 1.0);
        let mut b = ball(1.0, -1.0);
        assert_eq!(resolve(&mut a, &mut b), Resolution::Resolved);
        assert!((a.vel.x + 1.0).abs() < 1e-6);
        assert!((b.vel.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn tangential_velocity_untouched() {
        let mut a = ball(0.0, 1.0);
        a.vel.y = 0.5;
        let mut b = ball(1.5, 0.0);
        b.vel.z = -0.25;
        resolve(&mut a, &mut b);
        assert_eq!(a.vel.y, 0.5);
        assert_eq!(b.vel.z, -0.25);
        assert!(a.vel.x.abs() < 1e-6);
        assert!((b.vel.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn coincident_centres_are_degenerate() {
        let mut a = ball(1.0, 1.0);
        let mut b = ball(1.0, -1.0);
        assert_eq!(resolve(&mut a, &mut b), Resolution::Degenerate);
        assert_eq!(a.vel.x, 1.0);
        assert_eq!(b.vel.x, -1.0);
    }
}
