//! Math type re-exports and geometry primitives.
//!
//! Re-exports the `glam` types used throughout the crate and provides the
//! axis-aligned bounding box the BVH is built from.

// Re-export glam types
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

use bytemuck::{Pod, Zeroable};

/// Axis-aligned bounding box with single precision.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Empty bounding box (inverted, will expand on first point).
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create a new bounding box from min and max points.
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Grow to include a point.
    #[inline]
    pub fn grow_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grow to include another box.
    #[inline]
    pub fn grow(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Check if this box is empty (never grown, or inverted).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Center point of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent (max - min).
    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Longest axis (0=x, 1=y, 2=z).
    #[inline]
    pub fn longest_axis(&self) -> usize {
        let e = self.extent();
        if e.x > e.y {
            if e.x > e.z {
                0
            } else {
                2
            }
        } else if e.z > e.y {
            2
        } else {
            1
        }
    }

    /// Split the box at `pos` along `axis`, returning the (lower, upper) halves.
    #[inline]
    pub fn split(&self, axis: usize, pos: f32) -> (Aabb, Aabb) {
        let mut lower = *self;
        let mut upper = *self;
        lower.max[axis] = pos;
        upper.min[axis] = pos;
        (lower, upper)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Hermite smoothstep between two edges, clamped.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_grow() {
        let mut bb = Aabb::EMPTY;
        assert!(bb.is_empty());
        bb.grow_point(Vec3::new(1.0, -2.0, 3.0));
        bb.grow_point(Vec3::new(-1.0, 2.0, 0.0));
        assert!(!bb.is_empty());
        assert_eq!(bb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bb.max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(bb.center(), Vec3::new(0.0, 0.0, 1.5));
    }

    #[test]
    fn test_longest_axis() {
        let bb = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 3.0, 2.0));
        assert_eq!(bb.longest_axis(), 1);
        let bb = Aabb::new(Vec3::ZERO, Vec3::new(5.0, 3.0, 2.0));
        assert_eq!(bb.longest_axis(), 0);
        let bb = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 3.0, 7.0));
        assert_eq!(bb.longest_axis(), 2);
    }

    #[test]
    fn test_split() {
        let bb = Aabb::new(Vec3::ZERO, Vec3::new(4.0, 1.0, 1.0));
        let (lo, hi) = bb.split(0, 2.0);
        assert_eq!(lo.max.x, 2.0);
        assert_eq!(hi.min.x, 2.0);
        assert_eq!(lo.min, bb.min);
        assert_eq!(hi.max, bb.max);
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }
}
