//! Bounding volume hierarchy: spatial index over a triangle array.
//!
//! ## Architecture
//! ```text
//! TriangleSoup -> build (midpoint split, flat arena) -> Bvh -> intersect (stack traversal)
//! ```
//!
//! Nodes live in one flat array with the root at index 0; leaves reference
//! contiguous ranges of a reordered triangle index array. Construction is
//! deterministic for a fixed triangle order and depth limit.

mod build;
mod intersect;
mod node;
mod traverse;

pub use intersect::{ray_aabb_distance, ray_triangle, Ray, RayHit};
pub use node::{Bvh, BvhNode, Triangle};
