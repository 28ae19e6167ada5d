//! Primitive ray tests: slab ray/box and determinant ray/triangle.

use crate::util::{Aabb, Vec2, Vec3, Vec4};

use super::node::Triangle;

/// Rays below this determinant are treated as parallel to the triangle.
const DET_EPSILON: f32 = 1e-8;

/// A ray with origin and (not necessarily normalized) direction.
///
/// Scene code deliberately transforms directions into object space without
/// renormalizing, so the ray parameter measures the same distance in every
/// space it is traced in.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub const fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    /// Point at parameter `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// A surface hit with attributes interpolated from the triangle's vertices.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub position: Vec3,
    pub normal: Vec3,
    pub color: Vec4,
    pub uv: Vec2,
    pub distance: f32,
}

/// Slab test: distance to the box entry point, or `f32::INFINITY` when the
/// box is behind the ray origin or not intersected at all. The entry
/// distance is negative when the origin is inside the box.
#[inline]
pub fn ray_aabb_distance(ray: &Ray, aabb: &Aabb) -> f32 {
    let inv = ray.dir.recip();
    let t0 = (aabb.min - ray.origin) * inv;
    let t1 = (aabb.max - ray.origin) * inv;

    let tmin = t0.min(t1).max_element();
    let tmax = t0.max(t1).min_element();

    // box is behind the ray
    if tmax < 0.0 {
        return f32::INFINITY;
    }
    // no intersection
    if tmin > tmax {
        return f32::INFINITY;
    }
    tmin
}

/// Single-sided ray/triangle test.
///
/// The determinant must exceed a small epsilon, which culls back faces and
/// near-parallel configurations in one check; the hit needs a non-negative
/// distance and non-negative barycentric weights. Normal, color and uv are
/// interpolated by those weights.
pub fn ray_triangle(ray: &Ray, tri: &Triangle) -> Option<RayHit> {
    let edge1 = tri.v1.position - tri.v0.position;
    let edge2 = tri.v2.position - tri.v0.position;
    let normal = edge1.cross(edge2);
    let ao = ray.origin - tri.v0.position;
    let dao = ao.cross(ray.dir);

    let det = -ray.dir.dot(normal);
    if det < DET_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let dst = ao.dot(normal) * inv_det;
    let u = edge2.dot(dao) * inv_det;
    let v = -edge1.dot(dao) * inv_det;
    let w = 1.0 - u - v;

    if dst < 0.0 || u < 0.0 || v < 0.0 || w < 0.0 {
        return None;
    }

    Some(RayHit {
        position: ray.at(dst),
        normal: (tri.v0.normal * w + tri.v1.normal * u + tri.v2.normal * v)
            .normalize_or_zero(),
        color: tri.v0.color * w + tri.v1.color * u + tri.v2.color * v,
        uv: tri.v0.uv * w + tri.v1.uv * u + tri.v2.uv * v,
        distance: dst,
    })
}
