//! Random sampling helpers.
//!
//! Every function takes its random stream as an explicit `&mut SmallRng`, so
//! parallel callers keep one independent generator per task and results stay
//! reproducible for a fixed seed.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::Rng;

/// Uniformly distributed direction on the unit sphere.
///
/// Rejection-samples the unit ball and normalizes, so the distribution is
/// uniform over directions rather than biased toward the cube corners.
pub fn unit_vector(rng: &mut SmallRng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.random_range(-1.0..1.0f32),
            rng.random_range(-1.0..1.0f32),
            rng.random_range(-1.0..1.0f32),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-12 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Uniform direction on the hemisphere around `normal`.
///
/// A uniform sphere direction flipped into the normal's half space.
pub fn hemisphere(normal: Vec3, rng: &mut SmallRng) -> Vec3 {
    let dir = unit_vector(rng);
    if dir.dot(normal) < 0.0 {
        -dir
    } else {
        dir
    }
}

/// Uniform point in the centered unit square, components in [-0.5, 0.5).
pub fn point_in_square(rng: &mut SmallRng) -> Vec2 {
    Vec2::new(
        rng.random_range(-0.5..0.5f32),
        rng.random_range(-0.5..0.5f32),
    )
}

/// Uniform point in the unit disk (angle + sqrt-radius form).
pub fn point_in_disk(rng: &mut SmallRng) -> Vec2 {
    let angle = rng.random_range(0.0..2.0 * PI);
    Vec2::new(angle.cos(), angle.sin()) * rng.random::<f32>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_unit_vector_length() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..100 {
            let v = unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hemisphere_side() {
        let mut rng = SmallRng::seed_from_u64(2);
        let n = Vec3::new(0.0, 1.0, 0.0);
        for _ in 0..100 {
            assert!(hemisphere(n, &mut rng).dot(n) >= 0.0);
        }
    }

    #[test]
    fn test_point_in_disk_radius() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(point_in_disk(&mut rng).length() <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_point_in_square_bounds() {
        let mut rng = SmallRng::seed_from_u64(4);
        for _ in 0..100 {
            let p = point_in_square(&mut rng);
            assert!(p.x >= -0.5 && p.x < 0.5);
            assert!(p.y >= -0.5 && p.y < 0.5);
        }
    }
}
